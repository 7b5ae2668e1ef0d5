//! Roles and the immutable role map
//!
//! A role is a named bundle of scope templates. Holding `assume:<roleId>`
//! grants the role's templates; wildcard role ids (`prefix*`) are assumed
//! through any `assume:` scope sharing the prefix.
//!
//! # Example
//!
//! ```rust
//! use cretoai_scopes::roles::{Role, RoleMap};
//!
//! let roles = RoleMap::from_roles(vec![
//!     Role::new("worker-type:*", vec!["queue:claim-task:<...>".to_string()]),
//!     Role::new("admin", vec!["assume:worker-type:*".to_string()]),
//! ]).unwrap();
//!
//! assert!(roles.get("worker-type:*").unwrap().is_wildcard());
//! ```

pub mod map;
pub mod types;

pub use map::{RoleMap, RoleMapVersion};
pub use types::Role;
