//! Basic role expansion
//!
//! Grants a role's templates verbatim whenever its `assume:` pseudo-scope is
//! covered. Wildcard roles are matched by existence: one qualifying scope
//! grants the whole template set, with no placeholder substitution.

use super::fixed_point::FixedPoint;
use super::ScopeExpander;
use crate::error::Result;
use crate::roles::{Role, RoleMap};
use crate::scope::{assume_scope, satisfies, scopes_with_prefix, ScopeSet};
use tracing::{debug, info};

/// Expander without placeholder capture
///
/// Every scope it can add is a literal template from the role map, so the
/// fixed point is always reached and no round limit applies.
///
/// # Example
///
/// ```rust
/// use cretoai_scopes::expander::BasicExpander;
/// use cretoai_scopes::roles::RoleMap;
/// use cretoai_scopes::scope::scope_set;
///
/// let roles = RoleMap::from_pairs([("role1", vec!["r1a", "r1b"])]).unwrap();
/// let expander = BasicExpander::new(roles);
///
/// let expanded = expander.expand(&scope_set(["aa", "assume:role1"]));
/// assert_eq!(expanded, scope_set(["aa", "assume:role1", "r1a", "r1b"]));
/// ```
#[derive(Debug, Clone)]
pub struct BasicExpander {
    roles: RoleMap,
}

impl BasicExpander {
    /// Create an expander over the given role map
    pub fn new(roles: RoleMap) -> Self {
        info!(
            "BasicExpander initialized with {} roles (version {})",
            roles.len(),
            roles.version()
        );

        Self { roles }
    }

    /// Expand scopes to their fixed point and normalize the result
    ///
    /// Never fails; see [`ScopeExpander::expand`] for the fallible form
    /// shared with the parameterized variants.
    pub fn expand(&self, scopes: &ScopeSet) -> ScopeSet {
        let mut fixed_point = FixedPoint::new(scopes);

        while fixed_point.round(&self.roles, Self::grants) {}

        debug!(
            "Basic expansion converged after {} rounds: {} -> {} scopes",
            fixed_point.rounds(),
            scopes.len(),
            fixed_point.len()
        );

        fixed_point.finish()
    }

    /// Templates granted by `role` given the current working set
    fn grants(role: &Role, working: &ScopeSet) -> Vec<String> {
        let assumed = match role.wildcard_prefix() {
            Some(prefix) => scopes_with_prefix(working, &assume_scope(prefix))
                .next()
                .is_some(),
            None => satisfies(working, &role.assume_scope()),
        };

        if assumed {
            role.scopes.clone()
        } else {
            Vec::new()
        }
    }
}

impl ScopeExpander for BasicExpander {
    fn expand(&self, scopes: &ScopeSet) -> Result<ScopeSet> {
        Ok(BasicExpander::expand(self, scopes))
    }

    fn roles(&self) -> &RoleMap {
        &self.roles
    }
}
