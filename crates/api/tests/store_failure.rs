//! Record store failures surface as 500 responses carrying the store's own
//! message.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, post_json, UnreachableStore, UNREACHABLE_MESSAGE};
use serde_json::{json, Value};

fn unreachable_app() -> axum::Router {
    common::build_test_app_with_store(Arc::new(UnreachableStore))
}

async fn assert_store_error(response: axum::response::Response) {
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = body_json(response).await;
    assert_eq!(body["code"], "STORE_ERROR");
    let message = body["error"].as_str().unwrap();
    assert!(message.contains(UNREACHABLE_MESSAGE), "got: {message}");
}

#[tokio::test]
async fn report_fails_with_raw_store_message() {
    let app = unreachable_app();
    let response = get(&app, "/api/relatorios?periodo=mensal").await;
    assert_store_error(response).await;
}

#[tokio::test]
async fn create_fails_with_raw_store_message() {
    let app = unreachable_app();
    let body = json!({
        "data": "2026-10-14",
        "turno": "Manhã",
        "hora": "08:00",
        "orelha_kg": 1,
        "aparas_kg": 0,
        "itens": [{ "formato": "30x40", "cor": "azul", "pacote_kg": 1, "producao_kg": 5 }]
    });
    let response = post_json(&app, "/api/lancamentos", body).await;
    assert_store_error(response).await;
}

#[tokio::test]
async fn user_list_fails_with_raw_store_message() {
    let app = unreachable_app();
    assert_store_error(get(&app, "/api/users").await).await;
}

#[tokio::test]
async fn health_reports_degraded_store() {
    let app = unreachable_app();
    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["db_healthy"], false);
}
