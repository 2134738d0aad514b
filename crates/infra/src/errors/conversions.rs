//! Conversions from external infrastructure errors into domain errors.

use clavis_domain::ClavisError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ClavisError);

impl From<InfraError> for ClavisError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ClavisError> for InfraError {
    fn from(value: ClavisError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoClavisError {
    fn into_clavis(self) -> ClavisError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ClavisError */
/* -------------------------------------------------------------------------- */

impl IntoClavisError for HttpError {
    fn into_clavis(self) -> ClavisError {
        if self.is_timeout() {
            return ClavisError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return ClavisError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return ClavisError::Network(format!("invalid HTTP request: {self}"));
        }

        if self.is_body() || self.is_decode() {
            return ClavisError::Network(format!("failed to read HTTP response body: {self}"));
        }

        ClavisError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_clavis())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
