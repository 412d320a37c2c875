//! Value Objects
//!
//! Immutable values derived per request.

mod display_card;
mod permissions;
mod request_context;

pub use display_card::*;
pub use permissions::*;
pub use request_context::*;
