//! Conversions from external transport errors into domain errors.

use folio_domain::FolioError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub FolioError);

impl From<InfraError> for FolioError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<FolioError> for InfraError {
    fn from(value: FolioError) -> Self {
        InfraError(value)
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → FolioError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        let error = if value.is_timeout() {
            FolioError::Network(format!("http request timed out: {value}"))
        } else if value.is_connect() {
            FolioError::Network(format!("http connection failed: {value}"))
        } else if value.is_decode() {
            FolioError::Parse(format!("failed to decode http response body: {value}"))
        } else if value.is_builder() {
            FolioError::Config(format!("invalid http request: {value}"))
        } else {
            FolioError::Network(format!("http error: {value}"))
        };

        InfraError(error)
    }
}
