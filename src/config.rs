use std::env;

use dotenvy::dotenv;
use serde_json::{Map, Value, json};

use crate::constants::{
    API_VERSION, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_RESPONSE_MIME_TYPE,
    DEFAULT_TEMPERATURE, DEFAULT_TOP_K, DEFAULT_TOP_P, FORWARD_HEADERS, IDENTITY_PROBES,
    PERSONA_TEXT, REINFORCEMENT_TEXT, SAFETY_CATEGORIES, SAFETY_THRESHOLD, UPSTREAM_BASE_URL,
};

/// Server binding settings, resolved from env with CLI override in main.
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let host = env::var("GEMINI_PROXY_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("GEMINI_PROXY_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8787);

        Self { host, port }
    }
}

/// Process-wide proxy settings. Built once at startup, read-only afterwards;
/// every request-scoped operation borrows it through `AppState`.
pub struct ProxyConfig {
    pub upstream_base: String,
    pub api_version: String,
    pub model: String,
    pub default_generation: Map<String, Value>,
    pub safety_settings: Value,
    pub persona: String,
    pub reinforcement: String,
    pub forward_headers: Vec<String>,
    pub identity_probes: Vec<String>,
}

impl ProxyConfig {
    pub fn from_env() -> Self {
        dotenv().ok();

        let upstream_base =
            env::var("GEMINI_PROXY_UPSTREAM").unwrap_or_else(|_| UPSTREAM_BASE_URL.to_string());
        let api_version =
            env::var("GEMINI_PROXY_API_VERSION").unwrap_or_else(|_| API_VERSION.to_string());
        let model = env::var("GEMINI_PROXY_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let persona = env::var("GEMINI_PROXY_PERSONA").unwrap_or_else(|_| PERSONA_TEXT.to_string());

        let default_generation = default_generation_config();
        let safety_settings = default_safety_settings();

        Self {
            upstream_base,
            api_version,
            model,
            default_generation,
            safety_settings,
            persona,
            reinforcement: REINFORCEMENT_TEXT.to_string(),
            forward_headers: FORWARD_HEADERS.iter().map(|h| h.to_string()).collect(),
            identity_probes: IDENTITY_PROBES.iter().map(|k| k.to_string()).collect(),
        }
    }
}

fn default_generation_config() -> Map<String, Value> {
    let Value::Object(map) = json!({
        "temperature": DEFAULT_TEMPERATURE,
        "topP": DEFAULT_TOP_P,
        "topK": DEFAULT_TOP_K,
        "maxOutputTokens": DEFAULT_MAX_OUTPUT_TOKENS,
        "responseMimeType": DEFAULT_RESPONSE_MIME_TYPE,
    }) else {
        unreachable!()
    };
    map
}

fn default_safety_settings() -> Value {
    Value::Array(
        SAFETY_CATEGORIES
            .iter()
            .map(|category| json!({ "category": category, "threshold": SAFETY_THRESHOLD }))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_generation_config_fields() {
        let config = default_generation_config();
        assert_eq!(config["temperature"], json!(DEFAULT_TEMPERATURE));
        assert_eq!(config["topP"], json!(DEFAULT_TOP_P));
        assert_eq!(config["topK"], json!(DEFAULT_TOP_K));
        assert_eq!(config["maxOutputTokens"], json!(DEFAULT_MAX_OUTPUT_TOKENS));
        assert_eq!(config["responseMimeType"], json!(DEFAULT_RESPONSE_MIME_TYPE));
    }

    #[test]
    fn test_default_safety_settings_cover_all_categories() {
        let settings = default_safety_settings();
        let arr = settings.as_array().unwrap();
        assert_eq!(arr.len(), SAFETY_CATEGORIES.len());
        for entry in arr {
            assert_eq!(entry["threshold"], SAFETY_THRESHOLD);
        }
    }
}
