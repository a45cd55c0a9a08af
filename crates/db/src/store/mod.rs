//! Row-level record store contract.
//!
//! Handlers and repositories never talk to a database driver directly; they
//! go through a [`RecordStore`] handle injected via application state. Rows
//! are JSON objects keyed by column name, and every column a caller names is
//! checked against the table's whitelist before it reaches an implementation.

use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// A single row, keyed by column name.
pub type Row = Map<String, Value>;

/// Tables reachable through the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    ProductionLogs,
    Users,
}

const PRODUCTION_LOG_COLUMNS: &[&str] = &[
    "id",
    "data",
    "turno",
    "hora",
    "orelha_kg",
    "aparas_kg",
    "referencia_producao",
    "referencia_lote",
    "itens",
    "producao_total",
    "perdas_total",
    "created_at",
];

const USER_COLUMNS: &[&str] = &["id", "nome", "email", "senha", "tipo", "created_at"];

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Self::ProductionLogs => "lancamentos",
            Self::Users => "users",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::ProductionLogs => PRODUCTION_LOG_COLUMNS,
            Self::Users => USER_COLUMNS,
        }
    }

    /// Reject any column not in this table's whitelist.
    pub fn check_column(self, column: &str) -> Result<(), StoreError> {
        if self.columns().contains(&column) {
            Ok(())
        } else {
            Err(StoreError::UnknownColumn {
                table: self.name(),
                column: column.to_string(),
            })
        }
    }

    pub fn check_row(self, row: &Row) -> Result<(), StoreError> {
        row.keys().try_for_each(|k| self.check_column(k))
    }

    pub fn check_query(self, query: &SelectQuery) -> Result<(), StoreError> {
        query
            .filters
            .iter()
            .map(Filter::column)
            .chain(query.order.iter().map(|o| o.column))
            .try_for_each(|c| self.check_column(c))
    }
}

/// Errors surfaced by a [`RecordStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Unknown column '{column}' on table '{table}'")]
    UnknownColumn { table: &'static str, column: String },

    #[error("Refusing to write an empty row to '{0}'")]
    EmptyRow(&'static str),

    #[error("Malformed row: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Expected a JSON object row from '{0}'")]
    NotAnObject(&'static str),
}

pub type StoreResult<T> = Result<T, StoreError>;

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// A row predicate. Range filters compare in the column's own type.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(&'static str, Value),
    Gte(&'static str, Value),
    Lte(&'static str, Value),
    /// Case-insensitive substring match.
    ILike(&'static str, String),
}

impl Filter {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Eq(c, _) | Self::Gte(c, _) | Self::Lte(c, _) | Self::ILike(c, _) => *c,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub direction: Direction,
}

/// Filters (combined with AND) plus ordering for [`RecordStore::select`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectQuery {
    pub filters: Vec<Filter>,
    pub order: Vec<OrderBy>,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(column, value.into()));
        self
    }

    pub fn gte(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Gte(column, value.into()));
        self
    }

    pub fn lte(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Lte(column, value.into()));
        self
    }

    pub fn ilike(mut self, column: &'static str, needle: impl Into<String>) -> Self {
        self.filters.push(Filter::ILike(column, needle.into()));
        self
    }

    pub fn order_by(mut self, column: &'static str, direction: Direction) -> Self {
        self.order.push(OrderBy { column, direction });
        self
    }
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// Row-based access to the external record store.
///
/// Every operation returns the affected rows. There are no transactions and
/// no joins; multi-row computation happens in the caller.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert(&self, table: Table, row: Row) -> StoreResult<Vec<Row>>;

    /// Overwrite the given columns of the row whose `id` equals `id`.
    async fn update(&self, table: Table, id: Uuid, row: Row) -> StoreResult<Vec<Row>>;

    async fn delete(&self, table: Table, id: Uuid) -> StoreResult<Vec<Row>>;

    async fn select(&self, table: Table, query: &SelectQuery) -> StoreResult<Vec<Row>>;

    async fn health_check(&self) -> StoreResult<()>;
}

/// Turn a JSON value returned by a backend into a [`Row`].
pub(crate) fn into_row(table: Table, value: Value) -> StoreResult<Row> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAnObject(table.name())),
    }
}
