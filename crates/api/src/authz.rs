//! API-side authorization guard for commands.
//!
//! This enforces authorization at the command boundary (before dispatch),
//! while keeping domain types and stores auth-agnostic.

use stockpilot_auth::{AuthzError, CommandAuthorization, Permission, Principal, Role};

use crate::context::PrincipalContext;

/// Check authorization for a command in the current request context.
///
/// This is intended to be called **before** invoking the service layer.
pub fn authorize_command<C: CommandAuthorization>(
    principal: &PrincipalContext,
    command: &C,
) -> Result<(), AuthzError> {
    let principal = Principal {
        principal_id: principal.principal_id(),
        roles: principal.roles().to_vec(),
        permissions: permissions_from_roles(principal.roles()),
    };

    command.authorize(&principal)
}

/// Minimal role→permission mapping stub.
///
/// This is intentionally simple until a real policy source exists (e.g. DB-backed).
fn permissions_from_roles(roles: &[Role]) -> Vec<Permission> {
    // Convention: "admin" grants all permissions.
    if roles.iter().any(|r| r.as_str() == "admin") {
        return vec![Permission::new("*")];
    }

    // "clerk" covers day-to-day stock operations.
    if roles.iter().any(|r| r.as_str() == "clerk") {
        return vec![
            Permission::new("inventory.items.create"),
            Permission::new("inventory.items.restock"),
            Permission::new("inventory.consumption.record"),
        ];
    }

    Vec::new()
}
