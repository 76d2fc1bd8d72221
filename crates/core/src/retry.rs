//! Refresh-and-retry protocol for authorized requests
//!
//! Every transport call is classified into a tagged outcome immediately
//! after it completes, and the decision table below is the entire protocol.
//! A request is retried at most once, and only after a successful refresh:
//! a second 401 means the server rejected the refresh token itself, so
//! further retries cannot succeed.

use folio_domain::{FolioError, Result};

/// Which execution of the request is being classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// First execution, using whatever credentials were already installed
    Initial,
    /// Re-execution after a successful refresh
    Refreshed,
}

/// Tagged result of one transport call.
#[derive(Debug)]
pub enum AttemptOutcome<T> {
    /// The transport produced a usable response
    Success(T),
    /// HTTP 401: the access token was rejected
    Unauthorized,
    /// Connectivity fault, server error, or any other hard failure
    Failed(FolioError),
}

/// Next step decided from the transition table.
#[derive(Debug)]
pub enum Next<T> {
    /// Terminal: hand the result to the caller
    Return(Result<T>),
    /// Refresh the token pair and re-execute the same request once
    RefreshAndRetry,
}

/// Decision table for the refresh-and-retry protocol.
#[must_use]
pub fn advance<T>(attempt: Attempt, outcome: AttemptOutcome<T>) -> Next<T> {
    match (attempt, outcome) {
        (_, AttemptOutcome::Success(value)) => Next::Return(Ok(value)),
        (_, AttemptOutcome::Failed(err)) => Next::Return(Err(err)),
        (Attempt::Initial, AttemptOutcome::Unauthorized) => Next::RefreshAndRetry,
        (Attempt::Refreshed, AttemptOutcome::Unauthorized) => {
            Next::Return(Err(FolioError::InvalidTokens))
        }
    }
}
