// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server and index registries for Seekwell.
//!
//! The registries own no state of their own: every read and write goes through
//! the [`ConfigStore`](seekwell_core::ConfigStore). Each mutation checks the
//! admin capability before touching state, then takes a per-entity lock for
//! its read-modify-write.

pub mod admin;
pub mod indexes;
pub mod locks;
pub mod servers;

pub use admin::{AdminSurface, IndexSummary, LocalAction, Overview, ServerSummary};
pub use indexes::{IndexRegistry, QueryTarget};
pub use locks::EntityLocks;
pub use servers::{NewServer, ServerHealth, ServerRegistry, ServerUpdate};
