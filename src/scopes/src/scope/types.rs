/// Scope string conventions
///
/// Scopes are plain strings. The only structure they carry is textual:
/// a trailing `*` turns a scope into a prefix match, the `assume:` prefix
/// marks role assumption, and `<...>` is a substitution placeholder inside
/// role templates. Other components interpret scopes with the same rules,
/// so these constants are part of the wire contract.

use std::collections::BTreeSet;

/// Terminator that turns a scope into a prefix match
pub const WILDCARD: char = '*';

/// Prefix of the pseudo-scope that grants a role
pub const ASSUME_PREFIX: &str = "assume:";

/// Token in a role template replaced by the captured suffix
pub const PLACEHOLDER: &str = "<...>";

/// Set of unique scopes
///
/// Ordered so that scopes sharing a prefix are contiguous, which lets
/// prefix lookups use range scans instead of full iteration.
pub type ScopeSet = BTreeSet<String>;

/// Builds a [`ScopeSet`] from any iterator of scope strings
///
/// # Examples
///
/// ```
/// use cretoai_scopes::scope::scope_set;
///
/// let scopes = scope_set(["queue:claim-task:*", "assume:worker"]);
/// assert_eq!(scopes.len(), 2);
/// ```
pub fn scope_set<I, S>(scopes: I) -> ScopeSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    scopes.into_iter().map(Into::into).collect()
}

/// Returns whether the scope ends with the wildcard terminator
pub fn is_wildcard(scope: &str) -> bool {
    scope.ends_with(WILDCARD)
}

/// Returns the prefix covered by a wildcard scope, or `None` for literals
pub fn wildcard_prefix(scope: &str) -> Option<&str> {
    scope.strip_suffix(WILDCARD)
}

/// Builds the `assume:<role>` pseudo-scope for a role id or role prefix
pub fn assume_scope(role: &str) -> String {
    let mut scope = String::with_capacity(ASSUME_PREFIX.len() + role.len());
    scope.push_str(ASSUME_PREFIX);
    scope.push_str(role);
    scope
}
