//! Error types for the claim pipeline.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure of an external capability (classifier, embedder, evaluator,
/// profile lookup).
///
/// Capability failures are local: the affected sentence or theme is excluded
/// and the run continues.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CapabilityError {
    /// The capability reported an error.
    #[error("{capability} failed: {message}")]
    Failed {
        capability: &'static str,
        message: String,
    },

    /// The call did not return within its deadline.
    #[error("{capability} timed out after {timeout:?}")]
    Timeout {
        capability: &'static str,
        timeout: Duration,
    },

    /// The capability returned a value outside its contract.
    #[error("{capability} returned invalid output: {message}")]
    InvalidOutput {
        capability: &'static str,
        message: String,
    },
}

impl CapabilityError {
    pub fn failed(capability: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            capability,
            message: message.into(),
        }
    }

    pub fn invalid_output(capability: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidOutput {
            capability,
            message: message.into(),
        }
    }

    /// Short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Failed { .. } => "capability_failed",
            Self::Timeout { .. } => "capability_timeout",
            Self::InvalidOutput { .. } => "capability_invalid_output",
        }
    }
}

/// Errors that abort an operation.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Capability(#[from] CapabilityError),

    /// An upstream artifact violates the data-model invariants.
    #[error("malformed {artifact} artifact: {violation}")]
    MalformedArtifact {
        artifact: &'static str,
        violation: String,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
