//! Header filtering and cross-origin response headers.
//!
//! Both operations are pure: the filter never mutates the inbound map, and the
//! cross-origin set is a fixed constant merged into every response.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::constants::CORS_HEADERS;

/// Keep only inbound headers named in the allowlist, values untouched.
/// `HeaderName` is already lowercase, so a lowercase allowlist compares exact.
pub fn filter_forward_headers(inbound: &HeaderMap, allowlist: &[String]) -> HeaderMap {
    let mut filtered = HeaderMap::new();
    for (name, value) in inbound {
        if allowlist.iter().any(|allowed| allowed == name.as_str()) {
            filtered.append(name.clone(), value.clone());
        }
    }
    filtered
}

/// Stamp the fixed wildcard cross-origin headers onto a response header map.
pub fn apply_cors(headers: &mut HeaderMap) {
    for (name, value) in CORS_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FORWARD_HEADERS;

    fn allowlist() -> Vec<String> {
        FORWARD_HEADERS.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn test_filter_drops_cookie() {
        let mut inbound = HeaderMap::new();
        inbound.insert("cookie", HeaderValue::from_static("session=abc"));
        inbound.insert("content-type", HeaderValue::from_static("application/json"));

        let filtered = filter_forward_headers(&inbound, &allowlist());
        assert!(filtered.get("cookie").is_none());
        assert_eq!(filtered.get("content-type").unwrap(), "application/json");
    }

    #[test]
    fn test_filter_keeps_api_key() {
        let mut inbound = HeaderMap::new();
        inbound.insert("x-goog-api-key", HeaderValue::from_static("secret"));
        inbound.insert("authorization", HeaderValue::from_static("Bearer tok"));

        let filtered = filter_forward_headers(&inbound, &allowlist());
        assert_eq!(filtered.get("x-goog-api-key").unwrap(), "secret");
        assert!(filtered.get("authorization").is_none());
    }

    #[test]
    fn test_filter_is_case_insensitive_on_input() {
        // HeaderName normalizes to lowercase on parse, mirroring real inbound traffic
        let mut inbound = HeaderMap::new();
        inbound.insert(
            "Content-Type".parse::<HeaderName>().unwrap(),
            HeaderValue::from_static("text/plain"),
        );

        let filtered = filter_forward_headers(&inbound, &allowlist());
        assert_eq!(filtered.get("content-type").unwrap(), "text/plain");
    }

    #[test]
    fn test_apply_cors_sets_wildcards() {
        let mut headers = HeaderMap::new();
        apply_cors(&mut headers);
        assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
        assert_eq!(headers.get("access-control-allow-methods").unwrap(), "*");
        assert_eq!(headers.get("access-control-allow-headers").unwrap(), "*");
    }
}
