/// Scope matching with trailing-wildcard prefix semantics

use std::iter;
use std::ops::Bound;

use super::types::{ScopeSet, WILDCARD};

/// Checks whether a set of scopes covers a target scope
///
/// The target is covered if it is in the set, or if the set holds a
/// wildcard scope whose prefix starts the target. Only the set side is
/// interpreted: a wildcard target is treated as plain text, so `a*` is
/// covered by `a*` or `*` but not by `a:b`.
///
/// # Examples
///
/// ```
/// use cretoai_scopes::scope::{satisfies, scope_set};
///
/// let scopes = scope_set(["queue:claim-task:prov1/*"]);
/// assert!(satisfies(&scopes, "queue:claim-task:prov1/wt2"));
/// assert!(!satisfies(&scopes, "queue:claim-task:prov2/wt2"));
/// ```
pub fn satisfies(scopes: &ScopeSet, target: &str) -> bool {
    if scopes.contains(target) {
        return true;
    }

    // Probe `<prefix>*` for every prefix of the target, empty and full included.
    let mut probe = String::with_capacity(target.len() + 1);
    target
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(iter::once(target.len()))
        .any(|idx| {
            probe.clear();
            probe.push_str(&target[..idx]);
            probe.push(WILDCARD);
            scopes.contains(probe.as_str())
        })
}

/// Checks whether a set of scopes covers any of the targets
pub fn satisfies_any<T: AsRef<str>>(scopes: &ScopeSet, targets: &[T]) -> bool {
    targets.iter().any(|target| satisfies(scopes, target.as_ref()))
}

/// Checks whether a set of scopes covers all of the targets
///
/// An empty target list is trivially satisfied.
pub fn satisfies_all<T: AsRef<str>>(scopes: &ScopeSet, targets: &[T]) -> bool {
    targets.iter().all(|target| satisfies(scopes, target.as_ref()))
}

/// Iterates over the scopes in the set that start with `prefix`, in order
pub fn scopes_with_prefix<'a>(
    scopes: &'a ScopeSet,
    prefix: &'a str,
) -> impl Iterator<Item = &'a String> + 'a {
    scopes
        .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
        .take_while(move |scope| scope.starts_with(prefix))
}
