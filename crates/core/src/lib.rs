//! # Folio Core
//!
//! Session state and the refresh-and-retry protocol for the Folio
//! accounting API client.
//!
//! This crate contains:
//! - Port interfaces implemented by `folio-infra` (token endpoint)
//! - `SessionState`: credential and folder state with explicit transitions
//! - The retry decision table driving the single-refresh recovery protocol
//!
//! ## Architecture
//! - Depends only on `folio-domain`
//! - Pure state machines; all I/O lives behind the ports

pub mod auth_ports;
pub mod retry;
pub mod session;

// Re-export commonly used items
pub use auth_ports::TokenExchanger;
pub use retry::{advance, Attempt, AttemptOutcome, Next};
pub use session::SessionState;
