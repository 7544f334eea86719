use axum::{
    Json,
    body::to_bytes,
    extract::{Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;

use crate::AppState;
use crate::constants::{API_KEY_HEADER, GENERATE_ACTION};
use crate::error::ProxyError;
use crate::headers::filter_forward_headers;
use crate::transforms::prepare_generate_request;
use crate::upstream::{build_upstream_url, dispatch, relay_response};

/// Fallback dispatcher: any path containing the generate action is the proxy
/// surface, everything else is unknown. Preflight never reaches here — the
/// cross-origin middleware answers it first.
pub async fn fallback(State(state): State<Arc<AppState>>, request: Request) -> Response {
    if !request.uri().path().contains(GENERATE_ACTION) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Not found" })),
        )
            .into_response();
    }

    if request.method() != Method::POST {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(json!({ "error": "Method not allowed" })),
        )
            .into_response();
    }

    match generate(&state, request).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// The full pipeline: credential presence check, body preparation, header
/// filtering, one outbound call, streamed relay. No retries anywhere.
async fn generate(state: &AppState, request: Request) -> Result<Response, ProxyError> {
    // Checked before the body is even read; no outbound call without a key.
    let api_key = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .ok_or(ProxyError::MissingApiKey)?;

    let url = build_upstream_url(&state.config, &api_key, request.uri().query())?;
    let forward_headers = filter_forward_headers(request.headers(), &state.config.forward_headers);

    let raw = to_bytes(request.into_body(), usize::MAX)
        .await
        .map_err(|e| ProxyError::BodyRead(e.to_string()))?;
    let prepared = prepare_generate_request(raw, &state.config);

    tracing::info!(model = %state.config.model, "proxying generate request");

    let upstream = dispatch(&state.http_client, url, forward_headers, prepared).await?;

    if !upstream.status().is_success() {
        tracing::warn!(status = %upstream.status(), "upstream returned an error status");
    }

    // Success and upstream-error statuses relay the same way: verbatim.
    Ok(relay_response(upstream))
}
