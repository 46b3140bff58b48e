//! Operator session context.
//!
//! The role gates visibility of the admin surface (schema introspection,
//! destructive recreate) only. It is not an authorization boundary: the
//! data layer never consults it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Officer,
    Admin,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionContext {
    pub role: Role,
}

impl SessionContext {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    /// Whether the admin surface is visible to this session.
    pub fn can_administer(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}
