use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::account::errors::AuthenticationError;
use crate::domain::account::models::Account;
use crate::domain::account::models::Principal;
use crate::domain::account::ports::AuthenticationServicePort;
use crate::domain::account::ports::CredentialStore;

/// Domain service verifying login attempts against the credential store.
pub struct AuthenticationService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    password_hasher: auth::PasswordHasher,
}

impl<CS> AuthenticationService<CS>
where
    CS: CredentialStore,
{
    pub fn new(store: Arc<CS>) -> Self {
        Self {
            store,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    fn password_matches(&self, account: &Account, password: &str) -> bool {
        self.password_hasher
            .verify(password, &account.password_hash)
            .unwrap_or_else(|e| {
                tracing::warn!(
                    identifier = %account.identifier,
                    error = %e,
                    "Stored password hash is unreadable"
                );
                false
            })
    }
}

#[async_trait]
impl<CS> AuthenticationServicePort for AuthenticationService<CS>
where
    CS: CredentialStore,
{
    async fn authenticate(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<Principal, AuthenticationError> {
        let Some(account) = self.store.find_by_identifier(identifier).await? else {
            // Same cost as a wrong password
            self.password_hasher.verify_decoy(password);
            return Err(AuthenticationError::UnknownIdentifier);
        };

        // Verified before the enabled check so a disabled account costs the same
        let matches = self.password_matches(&account, password);

        if !account.enabled {
            return Err(AuthenticationError::AccountDisabled);
        }

        if !matches {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(Principal::from(&account))
    }
}
