use thiserror::Error;
use crate::sources::SourceKind;

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(String),

    #[error("Primary source unreachable: {0}")]
    PrimarySourceUnreachable(#[source] FetchError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure of a single source call. Carries the source it came from so the
/// aggregator can log and degrade the matching record field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("{origin} timed out after {after_secs}s")]
    Timeout { origin: SourceKind, after_secs: u64 },

    #[error("{origin} transport failure: {message}")]
    Transport { origin: SourceKind, message: String },

    #[error("{origin} returned HTTP {code}")]
    HttpStatus { origin: SourceKind, code: u16 },

    #[error("{origin} payload could not be parsed: {message}")]
    Parse { origin: SourceKind, message: String },
}

impl FetchError {
    pub fn origin(&self) -> SourceKind {
        match self {
            Self::Timeout { origin, .. }
            | Self::Transport { origin, .. }
            | Self::HttpStatus { origin, .. }
            | Self::Parse { origin, .. } => *origin,
        }
    }
}
