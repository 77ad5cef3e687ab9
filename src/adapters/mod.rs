//! Adapters - Implementations of the ports.

pub mod auth;
pub mod events;
pub mod memory;
pub mod postgres;
