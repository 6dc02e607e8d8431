// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Security enforcement for Seekwell.
//!
//! Provides the access guard that gates every configuration mutation, secret
//! redaction for backend settings and log output, and the TLS policy applied
//! to backend endpoint URLs.

pub mod guard;
pub mod redact;
pub mod tls;

pub use guard::{authorize, require, require_admin};
pub use redact::{redact, redact_settings};
pub use tls::{is_localhost, validate_endpoint_url};
