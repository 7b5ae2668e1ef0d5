/// Scope set normalization
///
/// Drops every scope already covered by a broader wildcard in the same set.
/// Coverage is decided against the complete input set, so the result does
/// not depend on the order in which scopes are visited.

use std::iter;

use super::types::{wildcard_prefix, ScopeSet, WILDCARD};

/// Removes scopes subsumed by a wildcard scope in the same set
///
/// A scope `S` is dropped when the set holds a different wildcard `P*`
/// and `S` starts with `P`. The pair `P*` / `P**` covers each other by that
/// rule; the broader `P*` is kept.
///
/// The result is idempotent: normalizing it again yields the same set.
///
/// # Examples
///
/// ```
/// use cretoai_scopes::scope::{normalize, scope_set};
///
/// let scopes = scope_set(["queue:*", "queue:claim", "auth:read"]);
/// assert_eq!(normalize(&scopes), scope_set(["queue:*", "auth:read"]));
/// ```
pub fn normalize(scopes: &ScopeSet) -> ScopeSet {
    scopes
        .iter()
        .filter(|scope| !is_subsumed(scope, scopes))
        .cloned()
        .collect()
}

/// Checks whether some other wildcard in the set covers `scope`
fn is_subsumed(scope: &str, scopes: &ScopeSet) -> bool {
    // Literals may be covered by `<any prefix, itself included>*`. A wildcard
    // `P*` only yields to a strictly shorter prefix of `P`.
    let limit = match wildcard_prefix(scope) {
        Some(prefix) => prefix.len(),
        None => scope.len() + 1,
    };

    let mut probe = String::with_capacity(scope.len() + 1);
    scope
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(iter::once(scope.len()))
        .take_while(|&idx| idx < limit)
        .any(|idx| {
            probe.clear();
            probe.push_str(&scope[..idx]);
            probe.push(WILDCARD);
            scopes.contains(probe.as_str())
        })
}
