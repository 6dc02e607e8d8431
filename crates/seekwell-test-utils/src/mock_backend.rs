// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock search backend for deterministic testing.
//!
//! `MockBackend` implements `SearchBackend` without any network I/O. Tests flip
//! its reachability and count its pings.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use seekwell_core::{
    AdapterType, BackendType, HealthStatus, PluginAdapter, SearchBackend, SeekwellError, Settings,
};

/// Settings key that makes [`MockBackend::validate_settings`] fail.
pub const REJECT_KEY: &str = "reject";

/// A backend client whose ping result is controlled by the test.
pub struct MockBackend {
    backend_type: BackendType,
    reachable: AtomicBool,
    pings: AtomicUsize,
}

impl MockBackend {
    /// Create a reachable mock for `backend_type`.
    pub fn new(backend_type: BackendType) -> Self {
        Self {
            backend_type,
            reachable: AtomicBool::new(true),
            pings: AtomicUsize::new(0),
        }
    }

    /// Create a mock whose pings fail.
    pub fn unreachable(backend_type: BackendType) -> Self {
        let mock = Self::new(backend_type);
        mock.set_reachable(false);
        mock
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    /// Number of pings received so far.
    pub fn ping_count(&self) -> usize {
        self.pings.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PluginAdapter for MockBackend {
    fn name(&self) -> &str {
        "mock"
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
impl SearchBackend for MockBackend {
    fn backend_type(&self) -> BackendType {
        self.backend_type
    }

    fn validate_settings(&self, settings: &Settings) -> Result<(), SeekwellError> {
        if settings.contains_key(REJECT_KEY) {
            return Err(SeekwellError::Validation(format!(
                "mock {} backend rejects `{REJECT_KEY}`",
                self.backend_type
            )));
        }
        Ok(())
    }

    async fn ping(&self, _settings: &Settings) -> bool {
        self.pings.fetch_add(1, Ordering::SeqCst);
        self.reachable.load(Ordering::SeqCst)
    }
}
