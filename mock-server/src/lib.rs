//! Mock of the WaniKani v2 endpoints the client fetches.
//!
//! Serves fixed fixture bodies and rejects any request whose
//! `Authorization` header is not `Token token=<api key>`.

pub mod fixtures;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const DEFAULT_API_KEY: &str = "mock-api-key";

#[derive(Clone)]
struct AppState {
    expected_auth: Arc<str>,
}

pub fn app(api_key: &str) -> Router {
    let state = AppState {
        expected_auth: format!("Token token={api_key}").into(),
    };
    Router::new()
        .route("/user", get(|| fixture(fixtures::user)))
        .route("/summary", get(|| fixture(fixtures::summary)))
        .route("/subjects", get(|| fixture(fixtures::subjects)))
        .route("/assignments", get(|| fixture(fixtures::assignments)))
        .route("/review_statistics", get(|| fixture(fixtures::review_statistics)))
        .route("/study_materials", get(|| fixture(fixtures::study_materials)))
        .route("/reviews", get(|| fixture(fixtures::reviews)))
        .route("/level_progression", get(|| fixture(fixtures::level_progression)))
        .layer(middleware::from_fn_with_state(state, authorize))
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

async fn fixture(body: fn() -> Value) -> Json<Value> {
    Json(body())
}

async fn authorize(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == &*state.expected_auth);

    tracing::info!(method = %request.method(), uri = %request.uri(), authorized, "request");

    if !authorized {
        let body = json!({"error": "Unauthorized. Nice try.", "code": 401});
        return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
    }
    next.run(request).await
}
