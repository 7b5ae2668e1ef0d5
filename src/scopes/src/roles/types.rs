//! Role type definitions

use crate::error::{ExpansionError, Result};
use crate::scope::{assume_scope, wildcard_prefix};
use serde::{Deserialize, Serialize};

/// A named bundle of scope templates
///
/// A principal holding `assume:<id>` is granted every template of the role.
/// When the id ends with `*` the role is a wildcard role: it is assumed
/// through any `assume:` scope sharing its prefix, and the parameterized
/// expanders substitute the remainder of that scope for `<...>` in the
/// templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role id (e.g., "worker-type:*")
    pub id: String,

    /// Granted scope templates, in definition order
    pub scopes: Vec<String>,
}

impl Role {
    /// Create a new role
    pub fn new(id: impl Into<String>, scopes: Vec<String>) -> Self {
        Self {
            id: id.into(),
            scopes,
        }
    }

    /// Validate the role definition
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(ExpansionError::InvalidRole(
                "Role id cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Prefix matched by a wildcard role, `None` for exact roles
    pub fn wildcard_prefix(&self) -> Option<&str> {
        wildcard_prefix(&self.id)
    }

    /// Returns whether this is a wildcard role
    pub fn is_wildcard(&self) -> bool {
        self.wildcard_prefix().is_some()
    }

    /// The pseudo-scope that grants this role
    pub fn assume_scope(&self) -> String {
        assume_scope(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_role() {
        let role = Role::new("role1", vec!["r1a".to_string(), "r1b".to_string()]);

        assert!(role.validate().is_ok());
        assert!(!role.is_wildcard());
        assert_eq!(role.wildcard_prefix(), None);
        assert_eq!(role.assume_scope(), "assume:role1");
    }

    #[test]
    fn test_wildcard_role() {
        let role = Role::new("worker-type:*", vec!["queue:claim-task:<...>".to_string()]);

        assert!(role.is_wildcard());
        assert_eq!(role.wildcard_prefix(), Some("worker-type:"));
        assert_eq!(role.assume_scope(), "assume:worker-type:*");
    }

    #[test]
    fn test_empty_id_rejected() {
        let role = Role::new("", vec!["scope".to_string()]);
        assert!(matches!(role.validate(), Err(ExpansionError::InvalidRole(_))));
    }

    #[test]
    fn test_empty_scopes_allowed() {
        let role = Role::new("noop", Vec::new());
        assert!(role.validate().is_ok());
    }

    #[test]
    fn test_serde_roundtrip_shape() {
        let role: Role =
            serde_json::from_str(r#"{"id": "role1", "scopes": ["r1a", "r1b"]}"#).unwrap();
        assert_eq!(role, Role::new("role1", vec!["r1a".into(), "r1b".into()]));
    }
}
