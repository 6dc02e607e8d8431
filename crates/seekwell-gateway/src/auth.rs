// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer token authentication for the admin API.
//!
//! The middleware only establishes who the caller is. Capability checks
//! happen in the registries, right before each mutation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use seekwell_config::model::AccessConfig;
use seekwell_core::{Actor, AdapterType, AuthAdapter, HealthStatus, PluginAdapter, SeekwellError};

use crate::error::ApiError;

/// Static token table loaded from `[[access.tokens]]`.
pub struct TokenAuthenticator {
    tokens: HashMap<String, Actor>,
}

impl TokenAuthenticator {
    pub fn new(access: &AccessConfig) -> Self {
        let tokens = access
            .tokens
            .iter()
            .map(|entry| {
                (
                    entry.token.clone(),
                    Actor::new(entry.name.clone(), entry.capabilities.iter().cloned()),
                )
            })
            .collect();
        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl std::fmt::Debug for TokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let actors: Vec<&str> = self.tokens.values().map(|a| a.id.as_str()).collect();
        f.debug_struct("TokenAuthenticator")
            .field("tokens", &"[redacted]")
            .field("actors", &actors)
            .finish()
    }
}

#[async_trait]
impl PluginAdapter for TokenAuthenticator {
    fn name(&self) -> &str {
        "token"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Auth
    }

    async fn health_check(&self) -> Result<HealthStatus, SeekwellError> {
        if self.tokens.is_empty() {
            Ok(HealthStatus::Degraded(
                "no access tokens configured".to_string(),
            ))
        } else {
            Ok(HealthStatus::Healthy)
        }
    }

    async fn shutdown(&self) -> Result<(), SeekwellError> {
        Ok(())
    }
}

#[async_trait]
impl AuthAdapter for TokenAuthenticator {
    async fn authenticate(&self, token: &str) -> Result<Option<Actor>, SeekwellError> {
        Ok(self.tokens.get(token).cloned())
    }
}

/// Middleware that resolves the bearer token to an [`Actor`] request extension.
///
/// With no tokens configured every request is rejected.
pub async fn auth_middleware(
    State(auth): State<Arc<dyn AuthAdapter>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::Unauthorized)?;

    let actor = auth
        .authenticate(token)
        .await?
        .ok_or(ApiError::Unauthorized)?;
    tracing::debug!(actor = %actor.id, path = %request.uri().path(), "authenticated");

    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}
