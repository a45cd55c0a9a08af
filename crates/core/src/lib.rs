//! Domain logic for the bag production tracker.
//!
//! Nothing in this crate performs I/O: records come in already fetched and
//! results go out as plain serializable values.

pub mod coerce;
pub mod error;
pub mod period;
pub mod production;
pub mod report;
pub mod roles;
pub mod types;
