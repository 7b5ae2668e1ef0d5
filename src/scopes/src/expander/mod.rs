//! Role-based scope expansion
//!
//! Computes the closure of a scope set under role assumption: holding
//! `assume:<role>` grants the role's scopes, which may in turn assume more
//! roles. Expansion runs to a fixed point and then normalizes the result.
//!
//! # Variants
//!
//! - [`BasicExpander`]: grants templates verbatim; always converges
//! - [`ParameterizedExpander`]: wildcard roles capture the matched suffix and
//!   splice it into `<...>`
//! - [`TruncatingExpander`]: like parameterized, but a wildcard capture cuts
//!   the template at `<...>`
//!
//! # Example
//!
//! ```rust
//! use cretoai_scopes::expander::{ScopeExpander, TruncatingExpander};
//! use cretoai_scopes::roles::RoleMap;
//! use cretoai_scopes::scope::scope_set;
//!
//! let roles = RoleMap::from_pairs([
//!     ("client:ci", vec!["assume:worker-type:prov1/*"]),
//!     ("worker-type:*", vec!["queue:claim-task:<...>"]),
//! ]).unwrap();
//!
//! let expander: Box<dyn ScopeExpander> = Box::new(TruncatingExpander::new(roles));
//! let expanded = expander.expand(&scope_set(["assume:client:ci"])).unwrap();
//!
//! assert!(expanded.contains("queue:claim-task:prov1/*"));
//! ```

mod fixed_point;
pub mod basic;
pub mod config;
pub mod parameterized;
pub mod substitution;

#[cfg(test)]
mod tests;

pub use basic::BasicExpander;
pub use config::ExpanderConfig;
pub use parameterized::{
    CapturingExpander, ParameterizedExpander, TruncatingExpander, DEFAULT_MAX_ROUNDS,
};
pub use substitution::{Splice, Substitution, SubstitutionMode, Truncate};

use crate::error::Result;
use crate::roles::RoleMap;
use crate::scope::ScopeSet;

/// Expansion of a scope set under a fixed role map
///
/// Implementations are pure: the same input and role map always produce the
/// same output, and nothing is retained between calls. They can be shared
/// across threads.
pub trait ScopeExpander: Send + Sync {
    /// Expand `scopes` to their fixed point and normalize the result
    ///
    /// On error the caller must treat the principal as holding no scopes
    /// beyond `scopes` itself.
    fn expand(&self, scopes: &ScopeSet) -> Result<ScopeSet>;

    /// Role map this expander reads
    fn roles(&self) -> &RoleMap;
}
