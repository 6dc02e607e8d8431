// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared HTTP plumbing for the Solr and Elasticsearch clients.

use std::time::Duration;

use seekwell_core::{SeekwellError, Settings};
use seekwell_security::validate_endpoint_url;
use tracing::debug;
use url::Url;

/// Settings key holding the engine's base URL.
pub const URL_KEY: &str = "url";

/// A reqwest client plus the endpoint policy applied to server settings.
#[derive(Debug, Clone)]
pub struct HttpPinger {
    client: reqwest::Client,
    require_tls: bool,
}

impl HttpPinger {
    /// Build a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration, require_tls: bool) -> Result<Self, SeekwellError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| SeekwellError::Backend {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            require_tls,
        })
    }

    /// The base URL from `settings`, checked against the TLS policy.
    pub fn endpoint(&self, settings: &Settings) -> Result<Url, SeekwellError> {
        let raw = string_setting(settings, URL_KEY)?.ok_or_else(|| {
            SeekwellError::Validation(format!("backend setting `{URL_KEY}` is required"))
        })?;
        validate_endpoint_url(raw, self.require_tls)
    }

    /// GET `url` and report whether it answered with a success status.
    ///
    /// Transport errors and timeouts count as unreachable.
    pub async fn get_ok(&self, url: Url, basic_auth: Option<(&str, Option<&str>)>) -> bool {
        let mut request = self.client.get(url.clone());
        if let Some((user, password)) = basic_auth {
            request = request.basic_auth(user, password);
        }
        match request.send().await {
            Ok(response) => {
                let status = response.status();
                debug!(url = %url, status = %status, "ping response");
                status.is_success()
            }
            Err(e) => {
                debug!(url = %url, error = %e, "ping failed");
                false
            }
        }
    }
}

/// Read an optional string setting; a non-string value is a validation error.
pub fn string_setting<'a>(
    settings: &'a Settings,
    key: &str,
) -> Result<Option<&'a str>, SeekwellError> {
    match settings.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Err(
            SeekwellError::Validation(format!("backend setting `{key}` must not be empty")),
        ),
        Some(serde_json::Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(SeekwellError::Validation(format!(
            "backend setting `{key}` must be a string"
        ))),
    }
}

/// Append path segments to a base URL, keeping any path the base already has.
pub fn join_path(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }
    url
}
