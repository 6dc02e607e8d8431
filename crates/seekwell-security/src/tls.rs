// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! TLS policy for backend endpoint URLs.
//!
//! Backend servers are reached over HTTP(S). When TLS is required, remote
//! endpoints must use HTTPS; loopback addresses are exempt.

use seekwell_core::SeekwellError;
use tracing::warn;
use url::Url;

/// Parse and check a backend endpoint URL.
///
/// - Only `http` and `https` schemes are accepted.
/// - With `require_tls`, remote URLs MUST use HTTPS. Localhost is exempt.
pub fn validate_endpoint_url(url: &str, require_tls: bool) -> Result<Url, SeekwellError> {
    let parsed = Url::parse(url)
        .map_err(|e| SeekwellError::Validation(format!("invalid endpoint URL `{url}`: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(SeekwellError::Validation(format!(
                "unsupported URL scheme `{other}` -- use http or https"
            )));
        }
    }

    let host = parsed.host_str().unwrap_or("");
    if host.is_empty() {
        return Err(SeekwellError::Validation(format!(
            "endpoint URL `{url}` has no host"
        )));
    }

    if require_tls && parsed.scheme() != "https" && !is_localhost(host) {
        warn!(host, "TLS required for remote backend endpoints");
        return Err(SeekwellError::Validation(
            "TLS required for remote backend endpoints -- use HTTPS".to_string(),
        ));
    }

    Ok(parsed)
}

/// Check if an address refers to localhost.
pub fn is_localhost(addr: &str) -> bool {
    matches!(addr, "127.0.0.1" | "::1" | "localhost" | "[::1]") || addr.starts_with("127.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_https_remote() {
        assert!(validate_endpoint_url("https://search.example.com:8983/solr", true).is_ok());
    }

    #[test]
    fn blocks_http_remote_when_tls_required() {
        let err = validate_endpoint_url("http://search.example.com/solr", true).unwrap_err();
        assert!(err.to_string().contains("TLS required"));
    }

    #[test]
    fn allows_http_remote_when_tls_not_required() {
        assert!(validate_endpoint_url("http://search.example.com/solr", false).is_ok());
    }

    #[test]
    fn allows_http_localhost() {
        assert!(validate_endpoint_url("http://127.0.0.1:8983/solr", true).is_ok());
        assert!(validate_endpoint_url("http://localhost:9200", true).is_ok());
        assert!(validate_endpoint_url("http://[::1]:9200", true).is_ok());
    }

    #[test]
    fn rejects_garbage_and_other_schemes() {
        assert!(matches!(
            validate_endpoint_url("not a url", false),
            Err(SeekwellError::Validation(_))
        ));
        assert!(validate_endpoint_url("ftp://search.example.com", false).is_err());
    }

    #[test]
    fn is_localhost_identifies_loopback() {
        assert!(is_localhost("127.0.0.1"));
        assert!(is_localhost("127.0.0.2"));
        assert!(is_localhost("::1"));
        assert!(is_localhost("[::1]"));
        assert!(is_localhost("localhost"));
        assert!(!is_localhost("10.0.0.1"));
        assert!(!is_localhost("search.example.com"));
    }
}
