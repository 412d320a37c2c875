//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with the chat platform.
//!
//! Implementations of these traits live in the integration crates.

pub mod platform;

// Re-exports
pub use platform::*;
