// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Elasticsearch client.
//!
//! Settings: `url` (required), `username`/`password` (optional basic auth).
//! A ping is a GET on the cluster root.

use async_trait::async_trait;
use seekwell_core::{
    AdapterType, BackendType, HealthStatus, PluginAdapter, SearchBackend, SeekwellError, Settings,
};

use crate::http::{string_setting, HttpPinger};

pub struct ElasticsearchBackend {
    http: HttpPinger,
}

impl ElasticsearchBackend {
    pub fn new(http: HttpPinger) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PluginAdapter for ElasticsearchBackend {
    fn name(&self) -> &str {
        "elasticsearch"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Backend
    }

    async fn health_check(&self) -> Result<HealthStatus, SeekwellError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SeekwellError> {
        Ok(())
    }
}

#[async_trait]
impl SearchBackend for ElasticsearchBackend {
    fn backend_type(&self) -> BackendType {
        BackendType::Elasticsearch
    }

    fn validate_settings(&self, settings: &Settings) -> Result<(), SeekwellError> {
        self.http.endpoint(settings)?;
        let user = string_setting(settings, "username")?;
        let password = string_setting(settings, "password")?;
        if password.is_some() && user.is_none() {
            return Err(SeekwellError::Validation(
                "backend setting `password` requires `username`".to_string(),
            ));
        }
        Ok(())
    }

    async fn ping(&self, settings: &Settings) -> bool {
        let Ok(url) = self.http.endpoint(settings) else {
            return false;
        };
        let auth = match string_setting(settings, "username") {
            Ok(Some(user)) => Some((user, string_setting(settings, "password").ok().flatten())),
            _ => None,
        };
        self.http.get_ok(url, auth).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend() -> ElasticsearchBackend {
        ElasticsearchBackend::new(HttpPinger::new(Duration::from_secs(2), false).unwrap())
    }

    fn settings(pairs: &[(&str, serde_json::Value)]) -> Settings {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn password_without_username_is_invalid() {
        let s = settings(&[
            ("url", json!("http://localhost:9200")),
            ("password", json!("changeme")),
        ]);
        let err = backend().validate_settings(&s).unwrap_err();
        assert!(err.to_string().contains("requires `username`"));
    }

    #[test]
    fn url_only_is_valid() {
        let s = settings(&[("url", json!("http://localhost:9200"))]);
        assert!(backend().validate_settings(&s).is_ok());
    }

    #[tokio::test]
    async fn ping_gets_cluster_root() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"cluster_name": "docker-cluster"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let s = settings(&[("url", json!(server.uri()))]);
        assert!(backend().ping(&s).await);
    }

    #[tokio::test]
    async fn unauthorized_cluster_is_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let s = settings(&[("url", json!(server.uri()))]);
        assert!(!backend().ping(&s).await);
    }
}
