pub mod auth;
pub mod info;
pub mod production_logs;
pub mod reports;
pub mod users;
