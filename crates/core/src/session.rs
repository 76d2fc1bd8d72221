//! Session credential state
//!
//! Holds the authenticating email, the current token pair, and the selected
//! folder. Mutations are explicit transitions, and the validation helpers
//! return errors instead of mutating on the side, which keeps the retry
//! protocol testable without a transport.

use folio_domain::{FolioError, Result, TokenPair};

/// Credential and scoping state for one logical API session.
///
/// The folder is orthogonal to authentication: it is never inferred from
/// credentials and survives a sign-out.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    email: Option<String>,
    tokens: Option<TokenPair>,
    folder: Option<String>,
}

impl SessionState {
    /// Empty state; `sign_in` must run before data operations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State pre-seeded with a previously persisted token pair.
    #[must_use]
    pub fn with_tokens(email: impl Into<String>, tokens: TokenPair) -> Self {
        Self { email: Some(email.into()), tokens: Some(tokens), folder: None }
    }

    /// True iff a token pair is present. Presence is the only check.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_some()
    }

    /// Select the folder scoping every data request. Fluent.
    pub fn set_folder(&mut self, folder: impl Into<String>) -> &mut Self {
        self.folder = Some(folder.into());
        self
    }

    /// Override the access token without touching the refresh token.
    ///
    /// Escape hatch for test and recovery scenarios; a refresh supersedes
    /// the override because it replaces the whole pair.
    pub fn set_access_token(&mut self, token: impl Into<String>) -> Result<()> {
        match self.tokens.as_mut() {
            Some(pair) => {
                pair.access_token = token.into();
                Ok(())
            }
            None => Err(FolioError::Unauthenticated),
        }
    }

    /// Record a completed authentication: email plus the issued pair.
    pub fn sign_in(&mut self, email: impl Into<String>, tokens: TokenPair) {
        self.email = Some(email.into());
        self.tokens = Some(tokens);
    }

    /// Install a freshly issued pair, superseding the previous pair wholesale.
    pub fn install_tokens(&mut self, tokens: TokenPair) {
        self.tokens = Some(tokens);
    }

    /// Drop credentials. The selected folder survives.
    pub fn clear(&mut self) {
        self.email = None;
        self.tokens = None;
    }

    /// Current token pair, or `Unauthenticated`.
    pub fn ensure_tokens(&self) -> Result<&TokenPair> {
        self.tokens.as_ref().ok_or(FolioError::Unauthenticated)
    }

    /// Authenticating email, or `Unauthenticated`.
    pub fn ensure_email(&self) -> Result<&str> {
        self.email.as_deref().ok_or(FolioError::Unauthenticated)
    }

    /// Selected folder, or `UndefinedFolder`.
    pub fn ensure_folder(&self) -> Result<&str> {
        self.folder.as_deref().ok_or(FolioError::UndefinedFolder)
    }

    /// Get the authenticating email
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Get the selected folder
    #[must_use]
    pub fn folder(&self) -> Option<&str> {
        self.folder.as_deref()
    }

    /// Get the current token pair
    #[must_use]
    pub fn tokens(&self) -> Option<&TokenPair> {
        self.tokens.as_ref()
    }
}
