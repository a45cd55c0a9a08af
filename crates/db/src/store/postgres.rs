//! [`RecordStore`] backed by Postgres through sqlx.
//!
//! Rows cross the wire as `jsonb`: reads use `to_jsonb(t)`, writes go through
//! `jsonb_populate_record`, so the database coerces JSON values into the
//! column types (dates, UUIDs, `jsonb` arrays). Column names are checked
//! against the table whitelist before being spliced into SQL; values are
//! always bound parameters.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{
    into_row, Direction, Filter, RecordStore, Row, SelectQuery, StoreError, StoreResult, Table,
};

/// Postgres-backed record store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_rows(
        &self,
        table: Table,
        mut qb: QueryBuilder<'_, Postgres>,
    ) -> StoreResult<Vec<Row>> {
        tracing::debug!(table = table.name(), sql = qb.sql(), "Record store query");
        let values = qb
            .build_query_scalar::<Value>()
            .fetch_all(&self.pool)
            .await?;
        values.into_iter().map(|v| into_row(table, v)).collect()
    }
}

/// Escape `%`, `_` and `\` so a needle matches literally inside `ILIKE`.
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Push `(jsonb_populate_record(NULL::table, $n)).column`, i.e. `value` cast
/// to the declared type of `column`.
fn push_typed_value(
    qb: &mut QueryBuilder<'static, Postgres>,
    table: Table,
    column: &'static str,
    value: &Value,
) {
    let mut probe = Row::new();
    probe.insert(column.to_string(), value.clone());
    qb.push("(jsonb_populate_record(NULL::")
        .push(table.name())
        .push(", ")
        .push_bind(Value::Object(probe))
        .push(")).")
        .push(column);
}

pub(crate) fn build_select(
    table: Table,
    query: &SelectQuery,
) -> StoreResult<QueryBuilder<'static, Postgres>> {
    table.check_query(query)?;

    let mut qb = QueryBuilder::new("SELECT to_jsonb(t) FROM ");
    qb.push(table.name()).push(" AS t");

    for (i, filter) in query.filters.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        match filter {
            Filter::Eq(column, value) => {
                qb.push("t.").push(*column).push(" = ");
                push_typed_value(&mut qb, table, *column, value);
            }
            Filter::Gte(column, value) => {
                qb.push("t.").push(*column).push(" >= ");
                push_typed_value(&mut qb, table, *column, value);
            }
            Filter::Lte(column, value) => {
                qb.push("t.").push(*column).push(" <= ");
                push_typed_value(&mut qb, table, *column, value);
            }
            Filter::ILike(column, needle) => {
                qb.push("t.")
                    .push(*column)
                    .push("::text ILIKE ")
                    .push_bind(format!("%{}%", escape_like(needle)));
            }
        }
    }

    for (i, order) in query.order.iter().enumerate() {
        qb.push(if i == 0 { " ORDER BY t." } else { ", t." });
        qb.push(order.column);
        qb.push(match order.direction {
            Direction::Asc => " ASC",
            Direction::Desc => " DESC",
        });
    }

    Ok(qb)
}

pub(crate) fn build_insert(table: Table, row: Row) -> StoreResult<QueryBuilder<'static, Postgres>> {
    table.check_row(&row)?;
    if row.is_empty() {
        return Err(StoreError::EmptyRow(table.name()));
    }
    let columns = row.keys().cloned().collect::<Vec<_>>().join(", ");

    let mut qb = QueryBuilder::new("INSERT INTO ");
    qb.push(table.name())
        .push(" AS t (")
        .push(&columns)
        .push(") SELECT ")
        .push(&columns)
        .push(" FROM jsonb_populate_record(NULL::")
        .push(table.name())
        .push(", ")
        .push_bind(Value::Object(row))
        .push(") RETURNING to_jsonb(t)");
    Ok(qb)
}

pub(crate) fn build_update(
    table: Table,
    id: Uuid,
    mut row: Row,
) -> StoreResult<QueryBuilder<'static, Postgres>> {
    table.check_row(&row)?;
    // Primary keys are immutable.
    row.remove("id");
    if row.is_empty() {
        return Err(StoreError::EmptyRow(table.name()));
    }
    let assignments = row
        .keys()
        .map(|c| format!("{c} = r.{c}"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut qb = QueryBuilder::new("UPDATE ");
    qb.push(table.name())
        .push(" AS t SET ")
        .push(&assignments)
        .push(" FROM jsonb_populate_record(NULL::")
        .push(table.name())
        .push(", ")
        .push_bind(Value::Object(row))
        .push(") AS r WHERE t.id = ")
        .push_bind(id)
        .push(" RETURNING to_jsonb(t)");
    Ok(qb)
}

pub(crate) fn build_delete(table: Table, id: Uuid) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("DELETE FROM ");
    qb.push(table.name())
        .push(" AS t WHERE t.id = ")
        .push_bind(id)
        .push(" RETURNING to_jsonb(t)");
    qb
}

#[async_trait]
impl RecordStore for PgStore {
    async fn insert(&self, table: Table, row: Row) -> StoreResult<Vec<Row>> {
        let qb = build_insert(table, row)?;
        self.fetch_rows(table, qb).await
    }

    async fn update(&self, table: Table, id: Uuid, row: Row) -> StoreResult<Vec<Row>> {
        let qb = build_update(table, id, row)?;
        self.fetch_rows(table, qb).await
    }

    async fn delete(&self, table: Table, id: Uuid) -> StoreResult<Vec<Row>> {
        self.fetch_rows(table, build_delete(table, id)).await
    }

    async fn select(&self, table: Table, query: &SelectQuery) -> StoreResult<Vec<Row>> {
        let qb = build_select(table, query)?;
        self.fetch_rows(table, qb).await
    }

    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
