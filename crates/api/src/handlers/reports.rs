//! Handler for `GET /api/relatorios`.

use axum::extract::{Query, State};
use bagline_core::period::{resolve_window, PeriodKind, DEFAULT_PERIOD};
use bagline_core::report::{build_report, ProductionReport};
use bagline_db::repositories::ProductionLogRepo;
use chrono::Local;

use crate::error::AppResult;
use crate::query::ReportParams;
use crate::response::{no_store_json, NoStoreJson};
use crate::state::AppState;

/// Resolve the `periodo` parameter. Absent or blank means the default
/// period; unrecognized names yield `None` (no implicit window).
fn period_kind(raw: Option<&str>) -> Option<PeriodKind> {
    match raw.map(str::trim).filter(|p| !p.is_empty()) {
        None => Some(DEFAULT_PERIOD),
        Some(name) => PeriodKind::parse(name),
    }
}

/// GET /api/relatorios
///
/// Aggregates the entries in the resolved window, optionally narrowed to
/// production references containing `referencia_producao`.
pub async fn production_report(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<NoStoreJson<ProductionReport>> {
    let kind = period_kind(params.periodo.as_deref());
    let today = Local::now().date_naive();
    let window = resolve_window(kind, params.data_inicio, params.data_fim, today);

    let logs = ProductionLogRepo::list_for_report(
        state.store(),
        window,
        params.referencia_producao.as_deref(),
    )
    .await?;

    tracing::debug!(
        period = ?kind,
        start = ?window.map(|w| w.start),
        end = ?window.map(|w| w.end),
        entries = logs.len(),
        "Building production report"
    );

    Ok(no_store_json(build_report(&logs, window)))
}
