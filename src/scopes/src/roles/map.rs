//! Immutable role map
//!
//! The role map is loaded once and handed to an expander at construction.
//! It is never mutated afterwards; cloning shares the underlying storage,
//! so one map can back many expanders and threads.

use super::types::Role;
use crate::error::{ExpansionError, Result};
use blake3::Hasher;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Content digest of a role map
///
/// Maps with the same roles and templates have the same version,
/// whatever order the roles were supplied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleMapVersion([u8; 32]);

impl RoleMapVersion {
    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for RoleMapVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Immutable mapping from role id to scope templates
///
/// Iteration follows the order roles were supplied in. Expansion results do
/// not depend on that order.
///
/// # Example
///
/// ```rust
/// use cretoai_scopes::roles::RoleMap;
///
/// let roles = RoleMap::from_json(r#"{
///     "worker-type:*": ["queue:claim-task:<...>"],
///     "admin": ["assume:worker-type:*"]
/// }"#).unwrap();
///
/// assert_eq!(roles.len(), 2);
/// assert!(roles.get("admin").is_some());
/// ```
#[derive(Clone, Deserialize, Serialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct RoleMap {
    /// Role definitions in insertion order
    roles: Arc<Vec<Role>>,

    /// Content digest, computed once at construction
    version: RoleMapVersion,
}

impl RoleMap {
    /// Create an empty role map
    pub fn new() -> Self {
        Self {
            roles: Arc::new(Vec::new()),
            version: Self::compute_version(&[]),
        }
    }

    /// Build a role map from role definitions
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A role id is empty
    /// - A role id appears more than once
    pub fn from_roles(roles: impl IntoIterator<Item = Role>) -> Result<Self> {
        let roles: Vec<Role> = roles.into_iter().collect();

        let mut seen = HashSet::with_capacity(roles.len());
        for role in &roles {
            role.validate()?;
            if !seen.insert(role.id.as_str()) {
                return Err(ExpansionError::DuplicateRole(role.id.clone()));
            }
        }

        let version = Self::compute_version(&roles);

        Ok(Self {
            roles: Arc::new(roles),
            version,
        })
    }

    /// Build a role map from `(role id, templates)` pairs
    ///
    /// ```rust
    /// use cretoai_scopes::roles::RoleMap;
    ///
    /// let roles = RoleMap::from_pairs([
    ///     ("role1", vec!["r1a", "r1b"]),
    ///     ("role2", vec!["r2a"]),
    /// ]).unwrap();
    /// assert_eq!(roles.role_ids(), vec!["role1", "role2"]);
    /// ```
    pub fn from_pairs<I, K, T, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_roles(pairs.into_iter().map(|(id, scopes)| {
            Role::new(id, scopes.into_iter().map(Into::into).collect())
        }))
    }

    /// Decode a role map from a JSON object of `{"roleId": ["scope", ...]}`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Iterate over the roles in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }

    /// Look up a role by id
    pub fn get(&self, id: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == id)
    }

    /// Number of roles
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns whether the map holds no roles
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Role ids in insertion order
    pub fn role_ids(&self) -> Vec<&str> {
        self.roles.iter().map(|role| role.id.as_str()).collect()
    }

    /// Content digest of this map
    pub fn version(&self) -> RoleMapVersion {
        self.version
    }

    /// BLAKE3 over the roles sorted by id, templates sorted, every string
    /// length-prefixed
    fn compute_version(roles: &[Role]) -> RoleMapVersion {
        let mut sorted: Vec<&Role> = roles.iter().collect();
        sorted.sort_by(|a, b| a.id.cmp(&b.id));

        let mut hasher = Hasher::new();
        hasher.update(&(sorted.len() as u64).to_le_bytes());

        for role in sorted {
            Self::hash_str(&mut hasher, &role.id);

            let mut scopes: Vec<&str> = role.scopes.iter().map(String::as_str).collect();
            scopes.sort_unstable();
            scopes.dedup();

            hasher.update(&(scopes.len() as u64).to_le_bytes());
            for scope in scopes {
                Self::hash_str(&mut hasher, scope);
            }
        }

        RoleMapVersion(*hasher.finalize().as_bytes())
    }

    fn hash_str(hasher: &mut Hasher, value: &str) {
        hasher.update(&(value.len() as u64).to_le_bytes());
        hasher.update(value.as_bytes());
    }
}

impl Default for RoleMap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RoleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleMap")
            .field("roles", &self.roles.len())
            .field("version", &self.version.to_string())
            .finish()
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for RoleMap {
    type Error = ExpansionError;

    fn try_from(map: BTreeMap<String, Vec<String>>) -> Result<Self> {
        Self::from_roles(map.into_iter().map(|(id, scopes)| Role::new(id, scopes)))
    }
}

impl From<RoleMap> for BTreeMap<String, Vec<String>> {
    fn from(map: RoleMap) -> Self {
        map.iter()
            .map(|role| (role.id.clone(), role.scopes.clone()))
            .collect()
    }
}
