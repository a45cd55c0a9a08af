//! Route definitions for the `/lancamentos` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::production_logs;
use crate::state::AppState;

/// Routes mounted at `/lancamentos`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(production_logs::list).post(production_logs::create),
        )
        .route(
            "/{id}",
            get(production_logs::get_by_id)
                .put(production_logs::update)
                .delete(production_logs::delete),
        )
}
