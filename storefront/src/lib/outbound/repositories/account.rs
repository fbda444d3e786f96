use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::account::errors::CredentialStoreError;
use crate::domain::account::models::Account;
use crate::domain::account::models::Role;
use crate::domain::account::ports::CredentialStore;

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>, CredentialStoreError> {
        let row = sqlx::query(
            r#"
            SELECT customer_id, password_hash, role, enabled
            FROM customers
            WHERE customer_id = $1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialStoreError::DatabaseError(e.to_string()))?;

        row.as_ref()
            .map(account_from_row)
            .transpose()
            .map_err(|e| CredentialStoreError::DatabaseError(e.to_string()))
    }
}

fn account_from_row(row: &PgRow) -> Result<Account, sqlx::Error> {
    let role: String = row.try_get("role")?;

    Ok(Account {
        identifier: row.try_get("customer_id")?,
        password_hash: row.try_get("password_hash")?,
        role: Role::parse(&role),
        enabled: row.try_get("enabled")?,
    })
}
