//! Route definitions for the `/relatorios` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/relatorios`.
///
/// ```text
/// GET /   -> production_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(reports::production_report))
}
