//! Port traits for infrastructure boundaries.
//!
//! The armory API is the only external dependency, so it is the only port.
//! Use cases depend on the trait; tests swap in `MockArmoryPort`.

mod external;

pub use external::ArmoryPort;

#[cfg(test)]
pub use external::MockArmoryPort;
