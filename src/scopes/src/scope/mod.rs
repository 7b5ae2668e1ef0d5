/// Scope matching and normalization
///
/// Scopes are permission strings. A scope ending in `*` is a wildcard that
/// covers every scope sharing its prefix; any other scope only matches
/// itself.
///
/// # Examples
///
/// ```
/// use cretoai_scopes::scope::{normalize, satisfies, scope_set};
///
/// let scopes = scope_set(["queue:*", "queue:claim-task:prov1/wt2"]);
///
/// assert!(satisfies(&scopes, "queue:define-task:prov1"));
/// assert_eq!(normalize(&scopes), scope_set(["queue:*"]));
/// ```

mod types;
mod matcher;
mod normalize;


pub use types::{
    assume_scope, is_wildcard, scope_set, wildcard_prefix, ScopeSet, ASSUME_PREFIX,
    PLACEHOLDER, WILDCARD,
};
pub use matcher::{satisfies, satisfies_all, satisfies_any, scopes_with_prefix};
pub use normalize::normalize;
