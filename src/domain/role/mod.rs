//! Role reference data.
//!
//! Roles are an enumerated set of authorization tags. They are immutable
//! seed data: loaded once at process start into a read-only registry and
//! shared by reference, never created or deleted at runtime.

mod registry;
mod role_name;

pub use registry::{Role, RoleRegistry};
pub use role_name::RoleName;
