//! Prepare requests for the Gemini API.
//!
//! This module provides the unified pipeline applied to every generate
//! request before dispatch:
//! - Normalize the body shape into a canonical content list
//! - Inject the persona system message and optional reinforcement
//! - Shallow-merge the client generation config over the defaults
//! - Attach the default safety settings when the client sends none
//!
//! Bodies the pipeline cannot recognize are never rejected: they degrade to a
//! byte-for-byte passthrough so the proxy is never the reason a structurally
//! unexpected request fails.

use bytes::Bytes;
use serde_json::{Map, Value};

use super::merge::merge_generation_config;
use super::normalize::normalize;
use super::persona::{append_reinforcement_if_probed, inject_persona};
use crate::config::ProxyConfig;

/// Outcome of preparing a request body.
pub enum PreparedBody {
    /// The body was recognized and rewritten; send as JSON.
    Rewritten(Value),
    /// Unrecognized shape; forward the original bytes unchanged.
    Passthrough(Bytes),
}

/// Run the full transformation pipeline over raw request bytes.
pub fn prepare_generate_request(raw: Bytes, config: &ProxyConfig) -> PreparedBody {
    let Ok(body) = serde_json::from_slice::<Value>(&raw) else {
        tracing::debug!("request body is not JSON, forwarding unchanged");
        return PreparedBody::Passthrough(raw);
    };

    let Some(mut messages) = normalize(&body) else {
        tracing::debug!("unrecognized body shape, forwarding unchanged");
        return PreparedBody::Passthrough(raw);
    };

    inject_persona(&mut messages, &config.persona);
    append_reinforcement_if_probed(&mut messages, &config.identity_probes, &config.reinforcement);

    let generation = merge_generation_config(
        &config.default_generation,
        body.get("generationConfig"),
    );

    // Start from the client object so unrelated top-level fields survive;
    // `prompt` has been consumed into the content list.
    let mut outbound = match body {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    outbound.remove("prompt");
    outbound.insert(
        "contents".to_string(),
        serde_json::to_value(&messages).unwrap_or_default(),
    );
    outbound.insert("generationConfig".to_string(), Value::Object(generation));
    outbound
        .entry("safetySettings".to_string())
        .or_insert_with(|| config.safety_settings.clone());

    PreparedBody::Rewritten(Value::Object(outbound))
}
