//! In-process [`RecordStore`] with the same filter and ordering semantics as
//! the Postgres store.
//!
//! Values are compared the way their JSON shapes allow: numbers numerically,
//! strings lexically (ISO dates and zero-padded times sort correctly).
//! Nothing is persisted.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Direction, Filter, RecordStore, Row, SelectQuery, StoreError, StoreResult, Table};

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<Table, Vec<Row>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Null, _) => Some(Ordering::Less),
        (_, Value::Null) => Some(Ordering::Greater),
        _ => None,
    }
}

fn matches(row: &Row, filter: &Filter) -> bool {
    let field = row.get(filter.column()).unwrap_or(&Value::Null);
    match filter {
        Filter::Eq(_, value) => match compare(field, value) {
            Some(ord) => ord == Ordering::Equal,
            None => field == value,
        },
        Filter::Gte(_, value) => {
            !field.is_null() && compare(field, value).is_some_and(Ordering::is_ge)
        }
        Filter::Lte(_, value) => {
            !field.is_null() && compare(field, value).is_some_and(Ordering::is_le)
        }
        Filter::ILike(_, needle) => {
            let haystack = match field {
                Value::String(s) => s.to_lowercase(),
                Value::Null => return false,
                other => other.to_string().to_lowercase(),
            };
            haystack.contains(&needle.to_lowercase())
        }
    }
}

fn has_id(row: &Row, id: Uuid) -> bool {
    row.get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        == Some(id)
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, table: Table, row: Row) -> StoreResult<Vec<Row>> {
        table.check_row(&row)?;
        if row.is_empty() {
            return Err(StoreError::EmptyRow(table.name()));
        }
        let mut tables = self.tables.write().await;
        tables.entry(table).or_default().push(row.clone());
        Ok(vec![row])
    }

    async fn update(&self, table: Table, id: Uuid, mut row: Row) -> StoreResult<Vec<Row>> {
        table.check_row(&row)?;
        row.remove("id");
        if row.is_empty() {
            return Err(StoreError::EmptyRow(table.name()));
        }
        let mut tables = self.tables.write().await;
        let updated: Vec<Row> = tables
            .entry(table)
            .or_default()
            .iter_mut()
            .filter(|existing| has_id(existing, id))
            .map(|existing| {
                existing.extend(row.clone());
                existing.clone()
            })
            .collect();
        Ok(updated)
    }

    async fn delete(&self, table: Table, id: Uuid) -> StoreResult<Vec<Row>> {
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table).or_default();
        let (removed, kept): (Vec<Row>, Vec<Row>) =
            rows.drain(..).partition(|existing| has_id(existing, id));
        *rows = kept;
        Ok(removed)
    }

    async fn select(&self, table: Table, query: &SelectQuery) -> StoreResult<Vec<Row>> {
        table.check_query(query)?;
        let tables = self.tables.read().await;
        let mut rows: Vec<Row> = tables
            .get(&table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| matches(row, f)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        rows.sort_by(|a, b| {
            query
                .order
                .iter()
                .map(|o| {
                    let null = Value::Null;
                    let left = a.get(o.column).unwrap_or(&null);
                    let right = b.get(o.column).unwrap_or(&null);
                    let ord = compare(left, right).unwrap_or(Ordering::Equal);
                    match o.direction {
                        Direction::Asc => ord,
                        Direction::Desc => ord.reverse(),
                    }
                })
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        });

        Ok(rows)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::store::into_row;

    fn log_row(id: Uuid, date: &str, time: &str, reference: &str, produced: f64) -> Row {
        into_row(
            Table::ProductionLogs,
            json!({
                "id": id.to_string(),
                "data": date,
                "hora": time,
                "referencia_producao": reference,
                "producao_total": produced,
            }),
        )
        .unwrap()
    }

    async fn seeded() -> (MemoryStore, Vec<Uuid>) {
        let store = MemoryStore::new();
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let rows = [
            log_row(ids[0], "2026-10-01", "08:00", "REF-Alpha", 10.0),
            log_row(ids[1], "2026-10-03", "14:00", "ref-beta", 20.0),
            log_row(ids[2], "2026-10-03", "06:00", "", 5.0),
            log_row(ids[3], "2026-09-28", "22:00", "Alpha-2", 7.5),
        ];
        for row in rows {
            store.insert(Table::ProductionLogs, row).await.unwrap();
        }
        (store, ids)
    }

    #[tokio::test]
    async fn select_orders_by_multiple_columns() {
        let (store, ids) = seeded().await;
        let query = SelectQuery::new()
            .order_by("data", Direction::Desc)
            .order_by("hora", Direction::Desc);
        let rows = store.select(Table::ProductionLogs, &query).await.unwrap();
        let order: Vec<String> = rows
            .iter()
            .map(|r| r["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            order,
            [ids[1], ids[2], ids[0], ids[3]].map(|id| id.to_string())
        );
    }

    #[tokio::test]
    async fn select_applies_inclusive_date_range() {
        let (store, _) = seeded().await;
        let query = SelectQuery::new()
            .gte("data", "2026-10-01")
            .lte("data", "2026-10-03");
        let rows = store.select(Table::ProductionLogs, &query).await.unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[tokio::test]
    async fn ilike_is_case_insensitive_contains() {
        let (store, _) = seeded().await;
        let query = SelectQuery::new().ilike("referencia_producao", "ALPHA");
        let rows = store.select(Table::ProductionLogs, &query).await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn eq_compares_numbers_numerically() {
        let (store, _) = seeded().await;
        let query = SelectQuery::new().eq("producao_total", 20);
        let rows = store.select(Table::ProductionLogs, &query).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["referencia_producao"], "ref-beta");
    }

    #[tokio::test]
    async fn update_merges_columns_and_keeps_id() {
        let (store, ids) = seeded().await;
        let changes = into_row(
            Table::ProductionLogs,
            json!({ "id": Uuid::new_v4().to_string(), "turno": "Noite" }),
        )
        .unwrap();
        let updated = store
            .update(Table::ProductionLogs, ids[0], changes)
            .await
            .unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0]["id"], ids[0].to_string());
        assert_eq!(updated[0]["turno"], "Noite");
        assert_eq!(updated[0]["producao_total"], 10.0);
    }

    #[tokio::test]
    async fn update_of_missing_id_affects_nothing() {
        let (store, _) = seeded().await;
        let changes = into_row(Table::ProductionLogs, json!({ "turno": "Tarde" })).unwrap();
        let updated = store
            .update(Table::ProductionLogs, Uuid::new_v4(), changes)
            .await
            .unwrap();
        assert!(updated.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_only_the_matching_row() {
        let (store, ids) = seeded().await;
        let removed = store.delete(Table::ProductionLogs, ids[2]).await.unwrap();
        assert_eq!(removed.len(), 1);
        let rest = store
            .select(Table::ProductionLogs, &SelectQuery::new())
            .await
            .unwrap();
        assert_eq!(rest.len(), 3);
    }

    #[tokio::test]
    async fn unknown_columns_are_rejected() {
        let store = MemoryStore::new();
        let row = into_row(Table::Users, json!({ "password": "x" })).unwrap();
        assert_matches!(
            store.insert(Table::Users, row).await,
            Err(StoreError::UnknownColumn { .. })
        );
    }
}
