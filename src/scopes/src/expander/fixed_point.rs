//! Fixed-point iteration shared by every expander variant

use crate::roles::{Role, RoleMap};
use crate::scope::{normalize, ScopeSet};

/// Working state of a single expansion call
///
/// The working set only grows within a call, so a round that leaves its
/// size unchanged has reached the fixed point. Every role in a round reads
/// the set as it stood when the round began, so the number of rounds is a
/// function of the set contents alone and not of role order.
#[derive(Debug)]
pub(crate) struct FixedPoint {
    working: ScopeSet,
    rounds: usize,
}

impl FixedPoint {
    /// Seed the working set from the caller's scopes
    pub(crate) fn new(initial: &ScopeSet) -> Self {
        Self {
            working: initial.clone(),
            rounds: 0,
        }
    }

    /// Run one round over every role, returning whether the set grew
    ///
    /// `grant` sees the working set as of the start of the round; grants
    /// are merged once every role has been visited.
    pub(crate) fn round<F>(&mut self, roles: &RoleMap, mut grant: F) -> bool
    where
        F: FnMut(&Role, &ScopeSet) -> Vec<String>,
    {
        self.rounds += 1;
        let before = self.working.len();

        let granted: Vec<String> = roles
            .iter()
            .flat_map(|role| grant(role, &self.working))
            .collect();
        self.working.extend(granted);

        self.working.len() != before
    }

    /// Rounds run so far
    pub(crate) fn rounds(&self) -> usize {
        self.rounds
    }

    /// Current size of the working set
    pub(crate) fn len(&self) -> usize {
        self.working.len()
    }

    /// Normalize and return the expanded set
    pub(crate) fn finish(self) -> ScopeSet {
        normalize(&self.working)
    }
}
