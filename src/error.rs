//! Error types for the enumeration pipeline.
//!
//! Every fallible operation in this crate returns [`Result`], whose error type
//! is the crate-wide [`Error`]. Each variant belongs to one of the coarse
//! [`ErrorKind`]s, which is what a user-facing diagnostic reports.

use std::fmt;

use num_bigint::BigUint;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors this crate can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// The node count is zero or negative.
    #[error("invalid configuration: node count must be positive, got {nodes}")]
    InvalidNodeCount { nodes: i64 },

    /// An index lies outside the encodable range for the node count.
    #[error("invalid configuration: index {index} is outside 0..={max} for {nodes} nodes")]
    IndexOutOfRange { index: BigUint, max: BigUint, nodes: usize },

    /// Any other invalid input: malformed matrices, repeated indices, unknown names.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The isomorphism oracle could not decide a comparison.
    #[error("oracle failure at index {index}: {reason}")]
    OracleFailure { index: BigUint, reason: String },

    /// The run would exceed the configured budget.
    #[error("resource exhaustion: at least 2^{bit_width} configurations for {nodes} nodes exceed the budget of {budget}")]
    ResourceExhaustion { nodes: usize, bit_width: usize, budget: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    InvalidConfiguration,
    OracleFailure,
    ResourceExhaustion,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidNodeCount { .. } | Error::IndexOutOfRange { .. } | Error::InvalidConfiguration(_) => {
                ErrorKind::InvalidConfiguration
            }
            Error::OracleFailure { .. } => ErrorKind::OracleFailure,
            Error::ResourceExhaustion { .. } => ErrorKind::ResourceExhaustion,
            Error::Io(_) | Error::Json(_) => ErrorKind::Io,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidConfiguration => "InvalidConfiguration",
            ErrorKind::OracleFailure => "OracleFailure",
            ErrorKind::ResourceExhaustion => "ResourceExhaustion",
            ErrorKind::Io => "Io",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_kind() {
        let err = Error::InvalidNodeCount { nodes: 0 };
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);

        let err = Error::OracleFailure {
            index: BigUint::from(7u32),
            reason: "boom".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::OracleFailure);
        assert_eq!(err.to_string(), "oracle failure at index 7: boom");

        let err = Error::ResourceExhaustion {
            nodes: 6,
            bit_width: 30,
            budget: 1000,
        };
        assert_eq!(
            err.to_string(),
            "resource exhaustion: at least 2^30 configurations for 6 nodes exceed the budget of 1000"
        );
        assert_eq!(err.kind(), ErrorKind::ResourceExhaustion);
        assert_eq!(err.kind().to_string(), "ResourceExhaustion");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
