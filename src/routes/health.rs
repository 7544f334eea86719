use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use serde_json::{Value, json};

use crate::{BUILD_TIME, GIT_HASH, VERSION};

/// Informational landing page for browsers poking at the proxy root.
pub async fn index() -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "Mentality AI proxy is running. POST to a generateContent path to use it.\n",
    )
        .into_response()
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn version() -> Json<Value> {
    Json(json!({
        "version": VERSION,
        "git_hash": GIT_HASH,
        "build_time": BUILD_TIME,
    }))
}
