//! Expander configuration

use super::parameterized::{CapturingExpander, DEFAULT_MAX_ROUNDS};
use super::substitution::SubstitutionMode;
use super::ScopeExpander;
use crate::error::{ExpansionError, Result};
use crate::roles::RoleMap;
use serde::{Deserialize, Serialize};

/// Parameterized expander configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExpanderConfig {
    /// Rounds allowed before expansion fails with `ExpansionDepthExceeded`
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,

    /// How captured suffixes are substituted into templates
    #[serde(default)]
    pub substitution: SubstitutionMode,
}

fn default_max_rounds() -> usize {
    DEFAULT_MAX_ROUNDS
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            substitution: SubstitutionMode::default(),
        }
    }
}

impl ExpanderConfig {
    /// Decode a configuration from JSON, filling omitted fields with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(ExpansionError::InvalidConfig(
                "max_rounds must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the configured expander over a role map
    pub fn build(&self, roles: RoleMap) -> Result<CapturingExpander<SubstitutionMode>> {
        self.validate()?;
        CapturingExpander::with_substitution(roles, self.substitution, self.max_rounds)
    }

    /// Build the configured expander behind a trait object
    pub fn build_boxed(&self, roles: RoleMap) -> Result<Box<dyn ScopeExpander>> {
        Ok(Box::new(self.build(roles)?))
    }
}
