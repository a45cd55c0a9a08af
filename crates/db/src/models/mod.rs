//! Row models and request DTOs.
//!
//! Each entity has a full row struct (decoded from store rows) and, where
//! clients send it, an input struct accepting both the wire names and their
//! English aliases.

pub mod production_log;
pub mod user;
