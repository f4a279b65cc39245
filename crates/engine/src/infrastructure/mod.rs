//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod armory;
pub mod config;
pub mod ports;
