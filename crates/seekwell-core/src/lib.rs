// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Seekwell, a search configuration registry.
//!
//! This crate provides the configuration entities (servers and indexes), the
//! error taxonomy, and the adapter traits implemented by the storage, backend,
//! and authentication crates.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SeekwellError;
pub use types::{
    Actor, AdapterType, BackendType, ConfigEntity, EntityKind, EntityStatus, FieldDefinition,
    FieldType, HealthStatus, IndexConfig, ProcessorRef, ServerConfig, Settings,
    ADMINISTER_SEARCH_CONFIGURATION,
};

pub use traits::{AuthAdapter, ConfigStore, EntityCursor, PluginAdapter, SearchBackend};
