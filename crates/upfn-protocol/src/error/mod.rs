//! Errors raised while serving a provider request.
//!
//! The host only ever sees a single message string, so every error here is a
//! `thiserror` enum whose `Display` output is the exact text placed in the
//! response. [`ErrorKind`] keeps the flat taxonomy available to logging
//! without it crossing the process boundary. I/O errors are wrapped in `Arc`
//! to satisfy the `result_large_err` Clippy lint.

use std::sync::Arc;

use strum::Display;
use thiserror::Error;

/// Flat classification of every failure a provider can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The request stream did not hold a well-formed request object.
    Decode,
    /// The requested function is not in the provider's table.
    UnknownFunction,
    /// A required parameter was absent or had an unusable shape.
    MissingParameter,
    /// A well-typed parameter was semantically invalid.
    InvalidParameter,
    /// Environment, filesystem or entropy access failed.
    Io,
    /// The response could not be written.
    Encoding,
}

/// Errors an operation implementation may return.
#[derive(Debug, Clone, Error)]
pub enum OperationError {
    /// A required parameter was absent, empty or not the expected type.
    #[error("{name} parameter required")]
    MissingParameter {
        /// Parameter name as it appears in the request.
        name: String,
    },

    /// A structured parameter was absent or not of the required shape.
    #[error("{name} parameter required and must be {requirement}")]
    ParameterShape {
        /// Parameter name as it appears in the request.
        name: String,
        /// Description of the accepted shape, e.g. `a list`.
        requirement: &'static str,
    },

    /// A parameter was present and well-typed but not acceptable.
    #[error("{message}")]
    InvalidParameter {
        /// Human-readable description of the violated constraint.
        message: String,
    },

    /// An environment, filesystem or entropy access failed.
    #[error("{context}: {source}")]
    Io {
        /// What the operation was attempting.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
}

impl OperationError {
    /// Builds a [`OperationError::MissingParameter`].
    #[must_use]
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Builds a [`OperationError::ParameterShape`].
    #[must_use]
    pub fn shape(name: impl Into<String>, requirement: &'static str) -> Self {
        Self::ParameterShape {
            name: name.into(),
            requirement,
        }
    }

    /// Builds a [`OperationError::InvalidParameter`].
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Builds a [`OperationError::Io`].
    #[must_use]
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source: Arc::new(source),
        }
    }

    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingParameter { .. } | Self::ParameterShape { .. } => {
                ErrorKind::MissingParameter
            }
            Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::Io { .. } => ErrorKind::Io,
        }
    }
}

/// Errors that collapse into an `{"error": ...}` response with exit status 1.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The request could not be decoded.
    #[error("Invalid request: {message}")]
    Decode {
        /// Parser or validation message.
        message: String,
        /// Underlying JSON error, when the parser produced one.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The requested function is not registered with the provider.
    #[error("Unknown function: {name}")]
    UnknownFunction {
        /// The exact function string from the request.
        name: String,
    },

    /// The operation implementation failed.
    #[error(transparent)]
    Operation(#[from] OperationError),
}

impl ProtocolError {
    /// Wraps a JSON parse failure.
    #[must_use]
    pub fn decode(source: serde_json::Error) -> Self {
        Self::Decode {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode { .. } => ErrorKind::Decode,
            Self::UnknownFunction { .. } => ErrorKind::UnknownFunction,
            Self::Operation(error) => error.kind(),
        }
    }
}

/// Errors raised while writing the response.
///
/// These cannot be reported through the response channel itself.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Serialising the response payload failed.
    #[error("failed to serialize response: {source}")]
    Serialize {
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },
    /// Writing the response to stdout failed.
    #[error("failed to write response: {source}")]
    Write {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl EncodeError {
    /// Classifies the error; always [`ErrorKind::Encoding`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Encoding
    }
}
