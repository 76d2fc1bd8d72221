//! Token endpoint port interfaces
//!
//! The session controller talks to the token endpoint exclusively through
//! this trait, so the refresh-and-retry protocol can be exercised against
//! in-memory doubles.

use async_trait::async_trait;
use folio_domain::{Result, TokenPair};

/// Trait for token endpoint operations
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    /// Exchange a one-time exchange token for the initial token pair
    async fn exchange_token(&self, email: &str, exchange_token: &str) -> Result<TokenPair>;

    /// Exchange a refresh token for a replacement token pair
    async fn refresh_token(&self, email: &str, refresh_token: &str) -> Result<TokenPair>;
}
