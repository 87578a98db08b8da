use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures talking to the upstream API.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{operation} {target} failed with API error ({status}): {body}")]
    Upstream {
        operation: &'static str,
        target: String,
        status: StatusCode,
        body: String,
    },

    #[error("{operation} {target} failed: {source}")]
    Transport {
        operation: &'static str,
        target: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} {target} rejected: {reason}")]
    InvalidArgument {
        operation: &'static str,
        target: String,
        reason: &'static str,
    },

    #[error("{operation} {target} returned an unexpected body: {source}")]
    Decode {
        operation: &'static str,
        target: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Upstream { status, .. } => Some(*status),
            Error::Transport { source, .. } => source.status(),
            Error::InvalidArgument { .. } | Error::Decode { .. } => None,
        }
    }
}

/// Invalid or incomplete environment configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: String, value: String },
}
