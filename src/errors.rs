//! Error types
//!
//! Every fallible operation returns [`TextRankError`]. Errors are reported
//! synchronously to the caller and nothing is partially computed.

use serde::Serialize;
use thiserror::Error;

/// Stable, machine-readable error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidParameter,
    UnknownVertex,
    InvalidConfig,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidParameter => "invalid_parameter",
            Self::UnknownVertex => "unknown_vertex",
            Self::InvalidConfig => "invalid_config",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum TextRankError {
    /// A parameter is outside its contracted range
    #[error("invalid parameter `{name}`: {message}")]
    InvalidParameter { name: String, message: String },

    /// An edge operation referenced a vertex that was never added
    #[error("unknown vertex {vertex}")]
    UnknownVertex { vertex: String },

    /// The JSON configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl TextRankError {
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn unknown_vertex(vertex: &impl std::fmt::Debug) -> Self {
        Self::UnknownVertex {
            vertex: format!("{vertex:?}"),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            Self::UnknownVertex { .. } => ErrorCode::UnknownVertex,
            Self::Config(_) => ErrorCode::InvalidConfig,
        }
    }
}

pub type Result<T> = std::result::Result<T, TextRankError>;
