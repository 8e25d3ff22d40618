//! Wire types for the relay endpoint.

pub mod chat;

pub use chat::{ChatTurn, RelayErrorBody, RelayRequest, RelayResponse, Role};
