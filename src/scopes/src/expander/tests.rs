//! Behaviour shared by every expander variant
//!
//! Each test runs against the basic, parameterized and truncating expanders;
//! variant-specific behaviour is tested next to each implementation.

use super::*;
use crate::error::ExpansionError;
use crate::scope::{satisfies, scope_set};

fn roles(pairs: Vec<(&str, Vec<&str>)>) -> RoleMap {
    RoleMap::from_pairs(pairs).unwrap()
}

fn variants(roles: RoleMap) -> Vec<(&'static str, Box<dyn ScopeExpander>)> {
    vec![
        ("basic", Box::new(BasicExpander::new(roles.clone()))),
        ("parameterized", Box::new(ParameterizedExpander::new(roles.clone()))),
        ("truncating", Box::new(TruncatingExpander::new(roles))),
    ]
}

fn assert_expands(map: RoleMap, input: &[&str], expected: &[&str]) {
    for (name, expander) in variants(map) {
        let expanded = expander.expand(&scope_set(input.iter().copied())).unwrap();
        assert_eq!(
            expanded,
            scope_set(expected.iter().copied()),
            "{} expander produced the wrong set",
            name
        );
    }
}

// ============================================================================
// Direct Role Tests
// ============================================================================

#[test]
fn test_identity() {
    assert_expands(RoleMap::new(), &["aa", "bb"], &["aa", "bb"]);
}

#[test]
fn test_empty_input() {
    assert_expands(roles(vec![("role1", vec!["r1a"])]), &[], &[]);
}

#[test]
fn test_expand_simple() {
    assert_expands(
        roles(vec![("role1", vec!["r1a", "r1b"])]),
        &["aa", "assume:role1"],
        &["aa", "assume:role1", "r1a", "r1b"],
    );
}

#[test]
fn test_expand_star() {
    assert_expands(
        roles(vec![("role1", vec!["r1a", "r1b"]), ("role2", vec!["r2a", "r2b"])]),
        &["aa", "assume:role*"],
        &["aa", "assume:role*", "r1a", "r1b", "r2a", "r2b"],
    );
}

#[test]
fn test_expand_role_star() {
    assert_expands(
        roles(vec![("role*", vec!["rstar"]), ("role2", vec!["r2a", "r2b"])]),
        &["aa", "assume:role2"],
        &["aa", "assume:role2", "rstar", "r2a", "r2b"],
    );
}

#[test]
fn test_assume_thing_star() {
    assert_expands(
        roles(vec![("thing-id:*", vec!["test-scope-1"])]),
        &["assume:thing-id:test"],
        &["assume:thing-id:test", "test-scope-1"],
    );
}

#[test]
fn test_assume_can_get_star() {
    assert_expands(
        roles(vec![("thing-id:*", vec!["*"])]),
        &["assume:thing-id:test"],
        &["*"],
    );
}

#[test]
fn test_astar_means_assume() {
    assert_expands(
        roles(vec![("test-1", vec!["a*"]), ("foo", vec!["bar"])]),
        &["assume:test-1"],
        &["a*", "bar"],
    );
}

#[test]
fn test_assumestar_means_assume() {
    assert_expands(
        roles(vec![("test-1", vec!["assume*"]), ("foo", vec!["bar"])]),
        &["assume:test-1"],
        &["assume*", "bar"],
    );
}

// ============================================================================
// Indirection Tests
// ============================================================================

#[test]
fn test_indirect_roles() {
    assert_expands(
        roles(vec![
            ("test-client-1", vec!["assume:test-role"]),
            ("test-role", vec!["special-scope"]),
        ]),
        &["assume:test-client-1"],
        &["assume:test-client-1", "assume:test-role", "special-scope"],
    );
}

#[test]
fn test_many_indirect_roles() {
    let mut pairs: Vec<(String, Vec<String>)> = (1..10)
        .map(|n| (format!("test-role-{}", n), vec![format!("assume:test-role-{}", n + 1)]))
        .collect();
    pairs.push(("test-role-10".to_string(), vec!["special-scope".to_string()]));

    let mut expected: Vec<String> = (1..=10).map(|n| format!("assume:test-role-{}", n)).collect();
    expected.push("special-scope".to_string());

    // Same result whichever order the chain is listed in
    let mut reversed = pairs.clone();
    reversed.reverse();

    for pairs in [pairs, reversed] {
        for (name, expander) in variants(RoleMap::from_pairs(pairs).unwrap()) {
            let expanded = expander.expand(&scope_set(["assume:test-role-1"])).unwrap();
            assert_eq!(expanded, scope_set(expected.clone()), "{} expander", name);
        }
    }
}

#[test]
fn test_cyclic_roles() {
    assert_expands(
        roles(vec![
            ("test-client-1", vec!["assume:test-role"]),
            ("test-role", vec!["special-scope", "assume:test-client-1"]),
        ]),
        &["assume:test-client-1"],
        &["assume:test-client-1", "assume:test-role", "special-scope"],
    );
}

#[test]
fn test_self_granting_role() {
    assert_expands(
        roles(vec![("loop", vec!["assume:loop", "x"])]),
        &["assume:loop"],
        &["assume:loop", "x"],
    );
}

#[test]
fn test_unassumed_roles_ignored() {
    assert_expands(
        roles(vec![("role1", vec!["r1a"]), ("other*", vec!["o"])]),
        &["role1", "assume:role", "assume:othe"],
        &["role1", "assume:role", "assume:othe"],
    );
}

// ============================================================================
// Parameterized Tests
// ============================================================================

#[test]
fn test_parameterized_claim_task() {
    let map = roles(vec![("worker-type:*", vec!["queue:claim-task:<...>"])]);

    for expander in [
        Box::new(ParameterizedExpander::new(map.clone())) as Box<dyn ScopeExpander>,
        Box::new(TruncatingExpander::new(map.clone())),
    ] {
        assert_eq!(
            expander.expand(&scope_set(["assume:worker-type:prov1/wt2"])).unwrap(),
            scope_set(["assume:worker-type:prov1/wt2", "queue:claim-task:prov1/wt2"])
        );
        assert_eq!(
            expander.expand(&scope_set(["assume:worker-type:prov1/*"])).unwrap(),
            scope_set(["assume:worker-type:prov1/*", "queue:claim-task:prov1/*"])
        );
    }
}

#[test]
fn test_scope_escalation_through_truncation() {
    let map = roles(vec![(
        "project:taskcluster:docs-upload:*",
        vec!["auth:aws-s3:read-write:tc-metadata-<...>/docs"],
    )]);
    let exact = scope_set(["assume:project:taskcluster:docs-upload:queue"]);
    let wildcard = scope_set(["assume:project:taskcluster:docs-upload:*"]);

    let truncating = TruncatingExpander::new(map.clone());
    assert_eq!(
        truncating.expand(&exact).unwrap(),
        scope_set([
            "assume:project:taskcluster:docs-upload:queue",
            "auth:aws-s3:read-write:tc-metadata-queue/docs",
        ])
    );
    assert_eq!(
        truncating.expand(&wildcard).unwrap(),
        scope_set([
            "assume:project:taskcluster:docs-upload:*",
            "auth:aws-s3:read-write:tc-metadata-*",
        ])
    );

    let splicing = ParameterizedExpander::new(map);
    assert_eq!(
        splicing.expand(&wildcard).unwrap(),
        scope_set([
            "assume:project:taskcluster:docs-upload:*",
            "auth:aws-s3:read-write:tc-metadata-*/docs",
        ])
    );
}

#[test]
fn test_circular_params_exceed_depth() {
    let map = roles(vec![("A*", vec!["assume:B<...>C"]), ("B*", vec!["assume:A<...>C"])]);

    for expander in [
        Box::new(ParameterizedExpander::new(map.clone())) as Box<dyn ScopeExpander>,
        Box::new(TruncatingExpander::new(map.clone())),
    ] {
        match expander.expand(&scope_set(["assume:A"])) {
            Err(ExpansionError::ExpansionDepthExceeded { max_rounds }) => {
                assert_eq!(max_rounds, DEFAULT_MAX_ROUNDS)
            }
            other => panic!("Expected ExpansionDepthExceeded, got {:?}", other),
        }
    }
}

#[test]
fn test_captured_roles_chain() {
    let map = roles(vec![
        ("project-admin:*", vec!["assume:project:<...>:*"]),
        ("project:*", vec!["project-scope:<...>"]),
    ]);

    let expander = ParameterizedExpander::new(map);
    let expanded = expander.expand(&scope_set(["assume:project-admin:pocket"])).unwrap();

    assert_eq!(
        expanded,
        scope_set([
            "assume:project-admin:pocket",
            "assume:project:pocket:*",
            "project-scope:pocket:*",
        ])
    );
}

// ============================================================================
// Normalization Timing
// ============================================================================

#[test]
fn test_normalization_happens_after_fixed_point() {
    // `assume:f*` covers `assume:foo`, but only `assume:foo` starts with the
    // `foo*` role prefix. Dropping it mid-loop would lose the grant.
    assert_expands(
        roles(vec![("foo*", vec!["granted"])]),
        &["assume:foo", "assume:f*"],
        &["assume:f*", "granted"],
    );
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_expansion_is_idempotent_and_monotonic() {
    let map = roles(vec![
        ("project-admin:*", vec!["auth:create-client:project/<...>/*", "assume:project:<...>:*"]),
        ("project:*", vec!["queue:route:<...>"]),
        ("client:ci", vec!["assume:project-admin:pocket", "assume:worker-type:*"]),
        ("worker-type:*", vec!["queue:claim-task:<...>", "queue:poll"]),
    ]);
    let input = scope_set(["assume:client:ci", "queue:claim-task:prov1/wt2", "misc"]);

    for (name, expander) in variants(map) {
        let once = expander.expand(&input).unwrap();
        let twice = expander.expand(&once).unwrap();
        assert_eq!(once, twice, "{} expander is not idempotent", name);

        for scope in &input {
            assert!(satisfies(&once, scope), "{} expander dropped {}", name, scope);
        }
    }
}
