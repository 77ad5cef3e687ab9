//! User domain module.
//!
//! The User aggregate with its registration, patch, and view types, plus
//! the pure format predicates for user-supplied text fields.

mod user;
pub mod validation;

pub use user::{AccountView, NewAccount, ResetPassword, User, UserPatch};
