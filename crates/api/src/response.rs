//! Shared response types for API handlers.

use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderName;
use axum::Json;
use serde::Serialize;

/// `Cache-Control` value for list and report responses, which must always
/// reflect the latest entries.
pub const NO_STORE: &str = "no-store, no-cache, must-revalidate, max-age=0";

/// A JSON body sent with [`NO_STORE`] caching headers.
pub type NoStoreJson<T> = ([(HeaderName, &'static str); 1], Json<T>);

pub fn no_store_json<T>(body: T) -> NoStoreJson<T> {
    ([(CACHE_CONTROL, NO_STORE)], Json(body))
}

/// `{ "success": true }`, optionally with the id of a created row.
#[derive(Debug, Serialize)]
pub struct SuccessResponse<I: Serialize = ()> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<I>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            id: None,
        }
    }
}

impl<I: Serialize> SuccessResponse<I> {
    pub fn created(id: I) -> Self {
        Self {
            success: true,
            id: Some(id),
        }
    }
}
