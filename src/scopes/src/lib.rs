//! # CretoAI Scope Expansion
//!
//! Computes the scopes a principal effectively holds, given the scopes it was
//! granted directly and a map from roles to the scopes those roles confer.
//!
//! ## Features
//!
//! - **Role assumption** through `assume:<roleId>` pseudo-scopes
//! - **Wildcard scopes and roles**: a trailing `*` matches by prefix
//! - **Parameterized roles**: wildcard roles substitute the captured suffix
//!   for `<...>` in their templates
//! - **Fixed-point expansion** with cycle tolerance and a divergence guard
//! - **Normalization**: scopes covered by a wildcard are dropped
//! - **Caching** keyed on the role-map version and the input scopes
//!
//! ## Example
//!
//! ```rust
//! use cretoai_scopes::{RoleMap, TruncatingExpander};
//! use cretoai_scopes::scope::{satisfies, scope_set};
//!
//! let roles = RoleMap::from_json(r#"{
//!     "client:ci": ["assume:worker-type:prov1/*", "assume:project-admin:pocket"],
//!     "worker-type:*": ["queue:claim-task:<...>"],
//!     "project-admin:*": ["auth:create-client:project/<...>/*"]
//! }"#).unwrap();
//!
//! let expander = TruncatingExpander::new(roles);
//! let expanded = expander.expand(&scope_set(["assume:client:ci"])).unwrap();
//!
//! assert!(satisfies(&expanded, "queue:claim-task:prov1/wt2"));
//! assert!(satisfies(&expanded, "auth:create-client:project/pocket/ci"));
//! ```

pub mod cache;
pub mod error;
pub mod expander;
pub mod roles;
pub mod scope;

// Re-export commonly used types
pub use cache::{CacheConfig, CacheStats, CachedExpander};
pub use error::{ExpansionError, Result};
pub use expander::{
    BasicExpander, CapturingExpander, ExpanderConfig, ParameterizedExpander, ScopeExpander,
    SubstitutionMode, TruncatingExpander,
};
pub use roles::{Role, RoleMap, RoleMapVersion};
pub use scope::{normalize, satisfies, ScopeSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
