use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("API key is required in the x-goog-api-key header")]
    MissingApiKey,

    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Upstream request failed: {0}")]
    Network(#[from] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        // Credential absence is the client's fault; everything else is a
        // generic 500 with a timestamp so the caller can correlate logs.
        // Cross-origin headers are stamped on by the response middleware.
        let status = match self {
            ProxyError::MissingApiKey => StatusCode::BAD_REQUEST,
            ProxyError::BodyRead(_) | ProxyError::InvalidUrl(_) | ProxyError::Network(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match &self {
            ProxyError::MissingApiKey => json!({ "error": self.to_string() }),
            _ => json!({
                "error": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
