//! Typed handles over the `/admin` endpoint groups

pub mod memberships;
pub mod permissions;
pub mod resources;
pub mod roles;
pub mod scopes;
pub mod tenants;
pub mod users;
