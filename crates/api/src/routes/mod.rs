pub mod auth;
pub mod health;
pub mod production_logs;
pub mod reports;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                  service banner
///
/// /lancamentos                       list, create
/// /lancamentos/{id}                  get, replace, delete
///
/// /relatorios                        period report
///
/// /auth/register                     register (public)
/// /auth/login                        login (public)
/// /auth/me                           current user (requires auth)
///
/// /users                             list
/// /users/{id}                        delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::info::banner))
        .nest("/lancamentos", production_logs::router())
        .nest("/relatorios", reports::router())
        .nest("/auth", auth::router())
        .nest("/users", users::router())
}
