//! Errors surfaced by generated codecs

use thiserror::Error;

/// Errors that can occur while encoding a generated type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A non-nullable alternate with no variant populated
    #[error("{name} has empty fields")]
    EmptyFields { name: String },

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors that can occur while decoding into a generated type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Explicit `null` given to an alternate without a null variant
    #[error("null not supported for {name}")]
    NullNotSupported { name: String },

    /// No variant of an alternate accepted the value
    #[error("can't convert to {name}: {data}")]
    NoMatch { name: String, data: String },

    /// Strict decoding met a top-level field the type does not declare
    #[error("unknown field `{field}`")]
    UnknownField { field: String },

    #[error("invalid wire value: {0}")]
    Invalid(String),
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        EncodeError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Invalid(err.to_string())
    }
}
