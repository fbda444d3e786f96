use thiserror::Error;

/// Error for path pattern parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("Path pattern must start with '/': {0}")]
    MissingLeadingSlash(String),

    #[error("Wildcard is only allowed as the last segment (`/*` or `/**`): {0}")]
    MisplacedWildcard(String),
}
