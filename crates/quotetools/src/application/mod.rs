//! Application Layer
//!
//! Use cases composed from domain services.

mod quote_service;

pub use quote_service::*;
