//! Outbound dispatch to the Gemini API and response relay back to the client.

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::Response,
};
use futures_util::TryStreamExt;
use url::Url;

use crate::config::ProxyConfig;
use crate::constants::ROUTING_PARAM;
use crate::error::ProxyError;
use crate::transforms::PreparedBody;

/// Framing headers not relayed: the server re-frames the streamed body.
/// `content-encoding` is not in this list on purpose. When no client
/// `accept-encoding` was forwarded, reqwest decodes the body and removes the
/// header itself; when the client negotiated the encoding, the header must
/// travel with the still-compressed body it describes.
const DROPPED_RESPONSE_HEADERS: &[&str] = &["content-length", "transfer-encoding"];

/// Build the upstream target: base + version + `models/{model}:generateContent`,
/// with the client's key and query parameters attached. The internal `_path`
/// routing parameter never reaches the upstream, and a client-supplied `key`
/// pair is superseded by the credential header.
pub fn build_upstream_url(
    config: &ProxyConfig,
    api_key: &str,
    client_query: Option<&str>,
) -> Result<Url, ProxyError> {
    let mut url = Url::parse(&format!(
        "{}/{}/models/{}:{}",
        config.upstream_base.trim_end_matches('/'),
        config.api_version,
        config.model,
        crate::constants::GENERATE_ACTION,
    ))?;

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("key", api_key);
        if let Some(query) = client_query {
            for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
                if name == ROUTING_PARAM || name == "key" {
                    continue;
                }
                pairs.append_pair(&name, &value);
            }
        }
    }

    Ok(url)
}

/// Issue the outbound call. A rewritten body goes out as JSON; a passthrough
/// body is forwarded as the original bytes, untouched.
pub async fn dispatch(
    client: &reqwest::Client,
    url: Url,
    headers: HeaderMap,
    body: PreparedBody,
) -> Result<reqwest::Response, ProxyError> {
    let builder = client.post(url).headers(headers);
    let response = match body {
        PreparedBody::Rewritten(json) => builder.json(&json).send().await?,
        PreparedBody::Passthrough(bytes) => builder.body(bytes).send().await?,
    };
    Ok(response)
}

/// Relay the upstream response: status and headers copied verbatim (success
/// and error statuses alike, framing headers excepted), body streamed through
/// without buffering so incremental completions reach the client
/// incrementally. Backpressure and cancellation follow from the stream: the
/// client's pace throttles the upstream read, and dropping the response
/// aborts the in-flight call.
pub fn relay_response(upstream: reqwest::Response) -> Response {
    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);

    let mut response_headers = HeaderMap::new();
    for (name, value) in upstream.headers() {
        if DROPPED_RESPONSE_HEADERS.contains(&name.as_str()) {
            continue;
        }
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_str().as_bytes()),
            HeaderValue::from_bytes(value.as_bytes()),
        ) {
            response_headers.append(name, value);
        }
    }

    let stream = upstream.bytes_stream().map_err(|e| {
        tracing::debug!("upstream body stream error: {e}");
        std::io::Error::other(e)
    });

    let mut response = Response::new(Body::from_stream(stream));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    response
}
