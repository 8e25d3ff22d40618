//! HTTP handlers for the relay service.

pub mod health;
pub mod relay;

pub use health::health_check;
pub use relay::{generate_response, method_not_allowed, NO_TEXT_PLACEHOLDER};
