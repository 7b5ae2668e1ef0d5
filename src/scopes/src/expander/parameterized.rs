//! Parameterized role expansion
//!
//! Extends basic expansion with placeholder capture: for a wildcard role
//! `prefix*`, every working scope `assume:prefix<capture>` grants the role's
//! templates with `<capture>` substituted for `<...>`. Exact roles behave as
//! in [`BasicExpander`](super::BasicExpander).
//!
//! Captures can feed further captures, so the working set may grow without
//! bound. A round limit turns that into [`ExpansionError::ExpansionDepthExceeded`].

use super::fixed_point::FixedPoint;
use super::substitution::{Splice, Substitution, Truncate};
use super::ScopeExpander;
use crate::error::{ExpansionError, Result};
use crate::roles::{Role, RoleMap};
use crate::scope::{assume_scope, satisfies, scopes_with_prefix, ScopeSet};
use tracing::{debug, info, warn};

/// Default limit on fixed-point rounds
pub const DEFAULT_MAX_ROUNDS: usize = 100;

/// Expander with placeholder capture, generic over the substitution rule
///
/// Use [`ParameterizedExpander`] or [`TruncatingExpander`] for the two
/// standard rules.
#[derive(Debug, Clone)]
pub struct CapturingExpander<S> {
    /// Immutable role definitions
    roles: RoleMap,

    /// Rule applied to every captured suffix
    substitution: S,

    /// Rounds allowed before the expansion is abandoned
    max_rounds: usize,
}

/// Splices the capture into every `<...>`
///
/// # Example
///
/// ```rust
/// use cretoai_scopes::expander::ParameterizedExpander;
/// use cretoai_scopes::roles::RoleMap;
/// use cretoai_scopes::scope::scope_set;
///
/// let roles = RoleMap::from_pairs([
///     ("worker-type:*", vec!["queue:claim-task:<...>"]),
/// ]).unwrap();
/// let expander = ParameterizedExpander::new(roles);
///
/// let expanded = expander.expand(&scope_set(["assume:worker-type:prov1/wt2"])).unwrap();
/// assert!(expanded.contains("queue:claim-task:prov1/wt2"));
/// ```
pub type ParameterizedExpander = CapturingExpander<Splice>;

/// Cuts the template at `<...>` when the capture is itself a wildcard
///
/// # Example
///
/// ```rust
/// use cretoai_scopes::expander::TruncatingExpander;
/// use cretoai_scopes::roles::RoleMap;
/// use cretoai_scopes::scope::scope_set;
///
/// let roles = RoleMap::from_pairs([
///     ("project:x:*", vec!["auth:write:tc-<...>/docs"]),
/// ]).unwrap();
/// let expander = TruncatingExpander::new(roles);
///
/// let expanded = expander.expand(&scope_set(["assume:project:x:*"])).unwrap();
/// assert!(expanded.contains("auth:write:tc-*"));
/// ```
pub type TruncatingExpander = CapturingExpander<Truncate>;

impl<S: Substitution + Default> CapturingExpander<S> {
    /// Create an expander with the default round limit
    pub fn new(roles: RoleMap) -> Self {
        Self::build(roles, S::default(), DEFAULT_MAX_ROUNDS)
    }

    /// Create an expander with a custom round limit
    ///
    /// # Errors
    ///
    /// Returns [`ExpansionError::InvalidConfig`] if `max_rounds` is zero.
    pub fn with_max_rounds(roles: RoleMap, max_rounds: usize) -> Result<Self> {
        Self::with_substitution(roles, S::default(), max_rounds)
    }
}

impl<S: Substitution> CapturingExpander<S> {
    /// Create an expander with an explicit substitution rule and round limit
    ///
    /// # Errors
    ///
    /// Returns [`ExpansionError::InvalidConfig`] if `max_rounds` is zero.
    pub fn with_substitution(roles: RoleMap, substitution: S, max_rounds: usize) -> Result<Self> {
        if max_rounds == 0 {
            return Err(ExpansionError::InvalidConfig(
                "max_rounds must be at least 1".to_string(),
            ));
        }

        Ok(Self::build(roles, substitution, max_rounds))
    }

    fn build(roles: RoleMap, substitution: S, max_rounds: usize) -> Self {
        info!(
            "CapturingExpander initialized with {} roles (version {}), substitution={:?}, max_rounds={}",
            roles.len(),
            roles.version(),
            substitution,
            max_rounds
        );

        Self {
            roles,
            substitution,
            max_rounds,
        }
    }

    /// Round limit for a single expansion
    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Substitution rule in use
    pub fn substitution(&self) -> &S {
        &self.substitution
    }

    /// Expand scopes to their fixed point and normalize the result
    ///
    /// # Errors
    ///
    /// Returns [`ExpansionError::ExpansionDepthExceeded`] if the working set
    /// is still growing after `max_rounds` rounds. No partial result is
    /// returned in that case.
    pub fn expand(&self, scopes: &ScopeSet) -> Result<ScopeSet> {
        let mut fixed_point = FixedPoint::new(scopes);

        while fixed_point.round(&self.roles, |role, working| self.grants(role, working)) {
            if fixed_point.rounds() >= self.max_rounds {
                warn!(
                    "Role expansion did not converge within {} rounds ({} scopes in working set)",
                    self.max_rounds,
                    fixed_point.len()
                );
                return Err(ExpansionError::ExpansionDepthExceeded {
                    max_rounds: self.max_rounds,
                });
            }
        }

        debug!(
            "Parameterized expansion converged after {} rounds: {} -> {} scopes",
            fixed_point.rounds(),
            scopes.len(),
            fixed_point.len()
        );

        Ok(fixed_point.finish())
    }

    /// Scopes granted by `role` given the current working set
    fn grants(&self, role: &Role, working: &ScopeSet) -> Vec<String> {
        match role.wildcard_prefix() {
            Some(prefix) => {
                let trigger = assume_scope(prefix);
                scopes_with_prefix(working, &trigger)
                    .flat_map(|scope| {
                        let capture = &scope[trigger.len()..];
                        role.scopes
                            .iter()
                            .map(move |template| self.substitution.substitute(template, capture))
                    })
                    .collect()
            }
            None if satisfies(working, &role.assume_scope()) => role.scopes.clone(),
            None => Vec::new(),
        }
    }
}

impl<S: Substitution> ScopeExpander for CapturingExpander<S> {
    fn expand(&self, scopes: &ScopeSet) -> Result<ScopeSet> {
        CapturingExpander::expand(self, scopes)
    }

    fn roles(&self) -> &RoleMap {
        &self.roles
    }
}
