//! Token types for the accounting API's OAuth-style credential flow
//!
//! Defines the token pair carried by an authenticated session, the raw
//! token endpoint response it is parsed from, and the RFC 6749 error body
//! returned when a grant is rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Access and refresh tokens issued by the token endpoint.
///
/// A pair is immutable once issued and is superseded wholesale by every
/// refresh; the two tokens are never merged field-by-field. Serializable so
/// callers can persist it between process runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Bearer token sent with every data request
    pub access_token: String,

    /// Token exchanged for a replacement pair when the access token expires
    pub refresh_token: String,
}

impl TokenPair {
    /// Create a new token pair
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token: refresh_token.into() }
    }
}

/// Token endpoint response body (RFC 6749 §5.1).
///
/// Only the two tokens are required. The remaining metadata is tolerated
/// but unused: refresh is reactive (driven by 401 responses), so no expiry
/// clock is tracked.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl From<TokenResponse> for TokenPair {
    fn from(response: TokenResponse) -> Self {
        Self::new(response.access_token, response.refresh_token)
    }
}

/// Token endpoint error body (RFC 6749 §5.2).
#[derive(Debug, Deserialize)]
pub struct OAuthErrorBody {
    pub error: String,
    pub error_description: Option<String>,
}

impl fmt::Display for OAuthErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_description {
            Some(desc) => write!(f, "{}: {}", self.error, desc),
            None => write!(f, "{}", self.error),
        }
    }
}

impl std::error::Error for OAuthErrorBody {}

#[cfg(test)]
mod tests {
    //! Unit tests for auth token types.
    use super::*;

    #[test]
    fn token_response_converts_into_pair() {
        let response: TokenResponse = serde_json::from_str(
            r#"{"access_token":"A1","refresh_token":"R1","token_type":"bearer","expires_in":3600}"#,
        )
        .unwrap();

        let pair: TokenPair = response.into();
        assert_eq!(pair.access_token, "A1");
        assert_eq!(pair.refresh_token, "R1");
    }

    #[test]
    fn token_response_tolerates_minimal_body() {
        // Only the two tokens are guaranteed by the API contract
        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token":"A1","refresh_token":"R1"}"#).unwrap();

        assert!(response.token_type.is_none());
        assert!(response.expires_in.is_none());
        assert!(response.scope.is_none());
    }

    #[test]
    fn token_pair_round_trips_through_json() {
        let pair = TokenPair::new("access", "refresh");
        let json = serde_json::to_string(&pair).unwrap();
        let restored: TokenPair = serde_json::from_str(&json).unwrap();
        assert_eq!(pair, restored);
    }

    #[test]
    fn oauth_error_display_with_description() {
        let error = OAuthErrorBody {
            error: "invalid_grant".to_string(),
            error_description: Some("The refresh token is invalid".to_string()),
        };

        let rendered = error.to_string();
        assert!(rendered.contains("invalid_grant"));
        assert!(rendered.contains("refresh token is invalid"));
    }

    #[test]
    fn oauth_error_display_without_description() {
        let error = OAuthErrorBody { error: "invalid_request".to_string(), error_description: None };
        assert_eq!(error.to_string(), "invalid_request");
    }
}
