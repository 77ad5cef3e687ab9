//! Paladin - User and Character Management Backend
//!
//! This crate implements the account lifecycle and authorization core
//! (registration, password reset, role grants, uniqueness enforcement)
//! together with the dependent hero lifecycle, behind abstract persistence
//! and event-publishing ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
