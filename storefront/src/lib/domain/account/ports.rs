use async_trait::async_trait;

use crate::domain::account::errors::AuthenticationError;
use crate::domain::account::errors::CredentialStoreError;
use crate::domain::account::models::Account;
use crate::domain::account::models::Principal;

/// Port for verifying login attempts.
#[async_trait]
pub trait AuthenticationServicePort: Send + Sync + 'static {
    /// Verify an identifier/password pair.
    ///
    /// # Arguments
    /// * `identifier` - Login identifier as submitted
    /// * `password` - Plaintext password as submitted
    ///
    /// # Returns
    /// Principal for the matching, enabled account
    ///
    /// # Errors
    /// * `UnknownIdentifier` - No account with this identifier
    /// * `AccountDisabled` - Account exists but is disabled
    /// * `InvalidCredentials` - Password does not match
    /// * `CredentialStore` - Lookup failed
    async fn authenticate(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<Principal, AuthenticationError>;
}

/// Read access to stored accounts.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve the account registered under a login identifier.
    ///
    /// # Returns
    /// Optional account (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Lookup failed
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>, CredentialStoreError>;
}
