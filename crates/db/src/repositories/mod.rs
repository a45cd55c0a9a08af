//! Typed repositories over a [`RecordStore`](crate::store::RecordStore).
//!
//! Each repository is a zero-sized struct with async associated functions
//! taking the store handle as their first argument.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::store::{into_row, Row, StoreResult, Table};

pub mod production_log_repo;
pub mod user_repo;

pub use production_log_repo::{ProductionLogFilter, ProductionLogRepo};
pub use user_repo::UserRepo;

/// Serialize a model into a row for `table`.
fn encode<T: Serialize>(table: Table, value: &T) -> StoreResult<Row> {
    into_row(table, serde_json::to_value(value)?)
}

fn decode<T: DeserializeOwned>(row: Row) -> StoreResult<T> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

fn decode_all<T: DeserializeOwned>(rows: Vec<Row>) -> StoreResult<Vec<T>> {
    rows.into_iter().map(decode).collect()
}

/// Decode the first returned row, if any.
fn decode_first<T: DeserializeOwned>(rows: Vec<Row>) -> StoreResult<Option<T>> {
    rows.into_iter().next().map(decode).transpose()
}
