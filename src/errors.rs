use thiserror::Error;

/// Main error type for the FRLG dex.
///
/// The pure chart functions never produce one of these; every variant comes from
/// request validation or from resolving an identifier against the upstream source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DexError {
    /// The request was malformed and was rejected before any upstream call
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),
    /// The upstream source has no record for the identifier
    #[error("{resource} \"{identifier}\" not found")]
    NotFound {
        resource: &'static str,
        identifier: String,
    },
    /// Network failure, timeout, 5xx or an undecodable body from the upstream source
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}

/// Errors related to malformed requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A team request named no Pokemon
    #[error("Provide a team of 1-{max} Pokemon names or IDs")]
    EmptyTeam { max: usize },
    /// A team request named more Pokemon than fit in a party
    #[error("A team can have at most {max} Pokemon, got {got}")]
    TeamTooLarge { max: usize, got: usize },
    /// A type label that is not one of the Generation 3 types
    #[error("Unrecognised type: {0}")]
    UnknownType(String),
    /// A type list that is not one or two types long
    #[error("Expected 1 or 2 types, got {0}")]
    TypeCount(usize),
    /// An identifier that cannot name an upstream record
    #[error("Invalid identifier: \"{0}\"")]
    InvalidIdentifier(String),
}

impl DexError {
    pub fn not_found(resource: &'static str, identifier: impl Into<String>) -> Self {
        DexError::NotFound {
            resource,
            identifier: identifier.into(),
        }
    }

    /// Whether retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DexError::UpstreamUnavailable(_))
    }
}

impl From<reqwest::Error> for DexError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DexError::UpstreamUnavailable(format!("request timed out: {}", err))
        } else {
            DexError::UpstreamUnavailable(err.to_string())
        }
    }
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: ron::error::SpannedError,
    },
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Type alias for Results using DexError
pub type DexResult<T> = Result<T, DexError>;
