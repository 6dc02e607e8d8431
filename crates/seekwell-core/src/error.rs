// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Seekwell.

use thiserror::Error;

use crate::types::EntityKind;

/// The primary error type used across all Seekwell traits and registry operations.
#[derive(Debug, Error)]
pub enum SeekwellError {
    /// Malformed input (missing required fields, bad machine names, bad positions).
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("{kind} `{id}` not found")]
    NotFound { kind: EntityKind, id: String },

    /// Referential integrity violation (delete of a referenced server, duplicate id).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backend type is unknown or has no registered client.
    #[error("invalid backend `{backend}`")]
    InvalidBackend { backend: String },

    /// The actor lacks the capability required for the operation.
    #[error("permission denied: missing capability `{capability}`")]
    Permission { capability: String },

    /// Operation against an index whose server (or the index itself) is disabled.
    #[error("index `{index}` is unavailable: server `{server}` is not serving queries")]
    BackendUnavailable { index: String, server: String },

    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Search backend client errors (transport failure, bad response).
    #[error("backend error: {message}")]
    Backend {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SeekwellError {
    /// Shorthand for a [`SeekwellError::NotFound`].
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Stable machine-readable name of the error kind, used in API payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound { .. } => "not_found",
            Self::Conflict(_) => "conflict",
            Self::InvalidBackend { .. } => "invalid_backend",
            Self::Permission { .. } => "permission",
            Self::BackendUnavailable { .. } => "backend_unavailable",
            Self::Config(_) => "config",
            Self::Storage { .. } => "storage",
            Self::Backend { .. } => "backend",
            Self::Internal(_) => "internal",
        }
    }
}
