//! `stockpilot-auth` — authentication/authorization boundary.
//!
//! The core treats callers as either an authorized principal or rejected;
//! credential issuance lives outside this crate. Signature verification
//! (`jwt`) and deterministic claims validation (`claims`) are kept separate.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod permissions;
pub mod principal;
pub mod roles;

pub use authorize::{AuthzError, CommandAuthorization, Principal, authorize};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, JwtError, JwtValidator};
pub use permissions::Permission;
pub use principal::PrincipalId;
pub use roles::Role;
