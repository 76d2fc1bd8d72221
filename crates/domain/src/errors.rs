//! Error types used throughout the client

use thiserror::Error;

/// Main error type for Folio
#[derive(Error, Debug)]
pub enum FolioError {
    /// A data operation ran before any token pair was installed.
    #[error(
        "not authenticated: call authenticate() with an exchange token, \
         or seed the session with a previously persisted token pair"
    )]
    Unauthenticated,

    /// A data operation ran before a folder was selected.
    #[error("no folder selected: call set_folder() before fetching data")]
    UndefinedFolder,

    /// A request using a freshly refreshed access token was still rejected.
    #[error(
        "access and refresh tokens were both rejected by the API; \
         re-authenticate with a new exchange token"
    )]
    InvalidTokens,

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Folio operations
pub type Result<T> = std::result::Result<T, FolioError>;
