//! Repository for the `lancamentos` table.

use bagline_core::period::DateRange;
use bagline_core::types::RecordId;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::{decode_all, decode_first, encode};
use crate::models::production_log::{ProductionLog, ProductionLogInput};
use crate::store::{Direction, RecordStore, SelectQuery, StoreResult, Table};

const TABLE: Table = Table::ProductionLogs;

/// Optional inclusive date bounds for listing entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductionLogFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

fn date_bounds(
    mut query: SelectQuery,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> SelectQuery {
    if let Some(from) = from {
        query = query.gte("data", from.to_string());
    }
    if let Some(to) = to {
        query = query.lte("data", to.to_string());
    }
    query
}

/// Provides CRUD and report queries for production log entries.
pub struct ProductionLogRepo;

impl ProductionLogRepo {
    /// Insert a new entry with derived totals in a single write.
    pub async fn create(
        store: &dyn RecordStore,
        input: ProductionLogInput,
    ) -> StoreResult<ProductionLog> {
        let log = input.into_log(Uuid::new_v4(), Some(Utc::now()));
        let rows = store.insert(TABLE, encode(TABLE, &log)?).await?;
        Ok(decode_first(rows)?.unwrap_or(log))
    }

    pub async fn find_by_id(
        store: &dyn RecordStore,
        id: RecordId,
    ) -> StoreResult<Option<ProductionLog>> {
        let query = SelectQuery::new().eq("id", id.to_string());
        decode_first(store.select(TABLE, &query).await?)
    }

    /// List entries newest first (by date, then entry time).
    pub async fn list(
        store: &dyn RecordStore,
        filter: ProductionLogFilter,
    ) -> StoreResult<Vec<ProductionLog>> {
        let query = date_bounds(SelectQuery::new(), filter.from, filter.to)
            .order_by("data", Direction::Desc)
            .order_by("hora", Direction::Desc);
        decode_all(store.select(TABLE, &query).await?)
    }

    /// Entries feeding a report: inside `window` (all time when `None`) and,
    /// when given, whose production reference contains `reference`
    /// case-insensitively.
    pub async fn list_for_report(
        store: &dyn RecordStore,
        window: Option<DateRange>,
        reference: Option<&str>,
    ) -> StoreResult<Vec<ProductionLog>> {
        let mut query = date_bounds(
            SelectQuery::new(),
            window.map(|w| w.start),
            window.map(|w| w.end),
        );
        if let Some(reference) = reference.map(str::trim).filter(|r| !r.is_empty()) {
            query = query.ilike("referencia_producao", reference);
        }
        let query = query
            .order_by("data", Direction::Asc)
            .order_by("hora", Direction::Asc);
        decode_all(store.select(TABLE, &query).await?)
    }

    /// Replace every client-editable field and recompute the totals.
    ///
    /// Returns `None` if no entry with the given `id` exists.
    pub async fn replace(
        store: &dyn RecordStore,
        id: RecordId,
        input: ProductionLogInput,
    ) -> StoreResult<Option<ProductionLog>> {
        let log = input.into_log(id, None);
        let rows = store.update(TABLE, id, encode(TABLE, &log)?).await?;
        decode_first(rows)
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(store: &dyn RecordStore, id: RecordId) -> StoreResult<bool> {
        Ok(!store.delete(TABLE, id).await?.is_empty())
    }
}
