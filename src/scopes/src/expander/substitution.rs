//! Placeholder substitution strategies
//!
//! A wildcard role captures the part of an `assume:` scope that follows its
//! prefix. The capture is substituted for `<...>` in the role's templates by
//! literal token search, with no pattern engine involved.

use crate::scope::{is_wildcard, PLACEHOLDER};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule for producing a concrete scope from a template and a capture
pub trait Substitution: fmt::Debug + Send + Sync {
    /// Substitute `capture` into `template`
    ///
    /// Templates without a placeholder are returned unchanged.
    fn substitute(&self, template: &str, capture: &str) -> String;
}

/// Replaces every `<...>` with the capture
///
/// ```rust
/// use cretoai_scopes::expander::{Splice, Substitution};
///
/// assert_eq!(Splice.substitute("assume:B<...>C", "bc*"), "assume:Bbc*C");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Splice;

impl Substitution for Splice {
    fn substitute(&self, template: &str, capture: &str) -> String {
        template.replace(PLACEHOLDER, capture)
    }
}

/// Like [`Splice`], except that a wildcard capture absorbs the first `<...>`
/// and everything after it
///
/// A wildcard followed by more literal text is not a usable scope, so the
/// template is cut at the wildcard instead. This widens the grant:
/// `tc-metadata-<...>/docs` with capture `*` becomes `tc-metadata-*`.
///
/// ```rust
/// use cretoai_scopes::expander::{Substitution, Truncate};
///
/// assert_eq!(Truncate.substitute("assume:B<...>C", "bc"), "assume:BbcC");
/// assert_eq!(Truncate.substitute("assume:B<...>C", "bc*"), "assume:Bbc*");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Truncate;

impl Substitution for Truncate {
    fn substitute(&self, template: &str, capture: &str) -> String {
        if !is_wildcard(capture) {
            return Splice.substitute(template, capture);
        }

        match template.find(PLACEHOLDER) {
            Some(idx) => {
                let mut scope = String::with_capacity(idx + capture.len());
                scope.push_str(&template[..idx]);
                scope.push_str(capture);
                scope
            }
            None => template.to_string(),
        }
    }
}

/// Substitution rule selected by configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubstitutionMode {
    /// [`Splice`]
    Splice,
    /// [`Truncate`]
    #[default]
    Truncate,
}

impl Substitution for SubstitutionMode {
    fn substitute(&self, template: &str, capture: &str) -> String {
        match self {
            Self::Splice => Splice.substitute(template, capture),
            Self::Truncate => Truncate.substitute(template, capture),
        }
    }
}
