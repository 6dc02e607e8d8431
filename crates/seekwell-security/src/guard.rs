// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability checks for configuration mutations.
//!
//! Capabilities are opaque strings. Registries call [`require`] before they
//! read any state for a mutation, so a denied call never changes anything.

use std::collections::BTreeSet;

use seekwell_core::{Actor, SeekwellError, ADMINISTER_SEARCH_CONFIGURATION};
use tracing::warn;

/// Returns true if `capabilities` contains `required`.
pub fn authorize(capabilities: &BTreeSet<String>, required: &str) -> bool {
    capabilities.contains(required)
}

/// Fails with [`SeekwellError::Permission`] unless the actor holds `required`.
pub fn require(actor: &Actor, required: &str) -> Result<(), SeekwellError> {
    if authorize(&actor.capabilities, required) {
        return Ok(());
    }
    warn!(actor = %actor.id, capability = required, "access denied");
    Err(SeekwellError::Permission {
        capability: required.to_string(),
    })
}

/// Shorthand for requiring the search configuration admin capability.
pub fn require_admin(actor: &Actor) -> Result<(), SeekwellError> {
    require(actor, ADMINISTER_SEARCH_CONFIGURATION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tracing_test::traced_test;

    #[test]
    fn authorize_checks_membership() {
        let caps: BTreeSet<String> = ["access administration pages".to_string()].into();
        assert!(authorize(&caps, "access administration pages"));
        assert!(!authorize(&caps, ADMINISTER_SEARCH_CONFIGURATION));
        assert!(!authorize(&BTreeSet::new(), ADMINISTER_SEARCH_CONFIGURATION));
    }

    #[test]
    fn require_admin_accepts_admin() {
        let admin = Actor::new("admin", [ADMINISTER_SEARCH_CONFIGURATION]);
        assert!(require_admin(&admin).is_ok());
    }

    #[traced_test]
    #[test]
    fn denial_is_logged_and_names_capability() {
        let viewer = Actor::new("viewer", ["access administration pages"]);
        let err = require_admin(&viewer).unwrap_err();
        match err {
            SeekwellError::Permission { capability } => {
                assert_eq!(capability, ADMINISTER_SEARCH_CONFIGURATION);
            }
            other => panic!("expected permission error, got {other:?}"),
        }
        assert!(logs_contain("access denied"));
        assert!(logs_contain("viewer"));
    }

    #[test]
    fn capability_match_is_exact() {
        let actor = Actor::new("a", ["Administer Search Configuration"]);
        assert!(require_admin(&actor).is_err());
    }

    proptest! {
        #[test]
        fn authorize_agrees_with_set_membership(
            caps in proptest::collection::btree_set("[a-z ]{1,20}", 0..6),
            required in "[a-z ]{1,20}",
        ) {
            prop_assert_eq!(authorize(&caps, &required), caps.contains(&required));
        }
    }
}
