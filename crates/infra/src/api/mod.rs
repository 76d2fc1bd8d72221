//! Accounting API client
//!
//! HTTP-based session controller and token endpoint client for the remote
//! accounting API.
//!
//! # Architecture
//!
//! - Uses the folio-infra `HttpClient` (no direct reqwest in callers)
//! - OAuth-style authentication with a single post-refresh retry on 401
//! - Folder scoping enforced on every data operation

pub mod auth;
pub mod session;

pub use auth::AuthClient;
pub use session::{Session, SessionBuilder};
