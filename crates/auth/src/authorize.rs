use thiserror::Error;

use crate::{Permission, PrincipalId, Role};

/// Authenticated principal with resolved permissions.
#[derive(Debug, Clone)]
pub struct Principal {
    pub principal_id: PrincipalId,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
}

impl Principal {
    pub fn has_permission(&self, required: &Permission) -> bool {
        self.permissions
            .iter()
            .any(|p| p.is_wildcard() || p == required)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("missing required permission: {0}")]
    Forbidden(String),
}

/// Pure authorization check: does `principal` hold `required`?
pub fn authorize(principal: &Principal, required: &Permission) -> Result<(), AuthzError> {
    if principal.has_permission(required) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_owned()))
    }
}

/// Commands that declare the permission they require.
pub trait CommandAuthorization {
    fn required_permission(&self) -> Permission;

    fn authorize(&self, principal: &Principal) -> Result<(), AuthzError> {
        authorize(principal, &self.required_permission())
    }
}
