use thiserror::Error;

/// Error for credential store lookups
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Why a login attempt did not produce a principal.
///
/// Every variant leads to the same outward login failure; the distinction exists
/// for logging only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Unknown login identifier")]
    UnknownIdentifier,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credential store unavailable: {0}")]
    CredentialStore(#[from] CredentialStoreError),
}

impl AuthenticationError {
    /// Short machine-readable tag for log fields.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthenticationError::UnknownIdentifier => "unknown_identifier",
            AuthenticationError::AccountDisabled => "account_disabled",
            AuthenticationError::InvalidCredentials => "invalid_credentials",
            AuthenticationError::CredentialStore(_) => "credential_store",
        }
    }
}
