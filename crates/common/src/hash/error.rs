use thiserror::Error;

/// Failures raised while lowering a value into its canonical form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HashError {
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Unsupported value at {path}: {reason}")]
    UnsupportedValue { path: String, reason: String },
}

pub type HashResult<T> = Result<T, HashError>;

impl serde::ser::Error for HashError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Self::Serialization(msg.to_string())
    }
}

impl HashError {
    pub(crate) fn float_at(path: &str) -> Self {
        Self::UnsupportedValue {
            path: path.to_string(),
            reason: "floating point numbers have no canonical form".to_string(),
        }
    }
}
