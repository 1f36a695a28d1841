//! Error types
use std::fmt;

#[derive(Debug)]
pub enum Error {
    Decode(DecodeError),
    Custom(String),
}

impl From<DecodeError> for Error {
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    fn from(err: DecodeError) -> Self {
        Error::Decode(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Decode(e) => write!(f, "decode error: {}", e),
            Error::Custom(e) => write!(f, "error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Decode(e) => e.source(),
            Error::Custom(_) => None,
        }
    }
}

/// Errors raised while decoding a server response.
///
/// A field missing from a response is not an error: it resolves to the
/// field's documented default. These variants cover input that is present
/// but unusable.
#[derive(Debug)]
pub enum DecodeError {
    Json(serde_json::Error),
    InvalidDocument(String),
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
    UnknownPolicy {
        field: &'static str,
        value: String,
    },
}

impl From<serde_json::Error> for DecodeError {
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json(err)
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecodeError::Json(e) => write!(f, "{}", e),
            DecodeError::InvalidDocument(e) => write!(f, "invalid document: {}", e),
            DecodeError::InvalidField { field, expected } => {
                write!(f, "invalid value for \"{}\": expected {}", field, expected)
            }
            DecodeError::UnknownPolicy { field, value } => {
                write!(f, "unknown {} \"{}\"", field, value)
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Json(e) => Some(e),
            _ => None,
        }
    }
}
