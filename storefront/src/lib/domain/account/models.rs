use std::fmt;

/// Authority granted to an account.
///
/// The storefront knows two roles. Labels read from storage that match neither are
/// kept as `Other` so that routing can refuse them explicitly instead of guessing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    User,
    Admin,
    Other(String),
}

impl Role {
    const AUTHORITY_PREFIX: &'static str = "ROLE_";

    /// Parse a role label.
    ///
    /// Case-insensitive; the `ROLE_` authority prefix is optional, so `USER`,
    /// `user` and `ROLE_USER` are the same role.
    pub fn parse(label: &str) -> Self {
        let normalized = label.trim().to_ascii_uppercase();
        let bare = normalized
            .strip_prefix(Self::AUTHORITY_PREFIX)
            .unwrap_or(&normalized);

        match bare {
            "USER" => Role::User,
            "ADMIN" => Role::Admin,
            other => Role::Other(other.to_string()),
        }
    }

    /// Canonical label without the authority prefix.
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
            Role::Other(label) => label,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored credentials for one login identifier.
///
/// Owned by the credential store; the gate only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub identifier: String,
    pub password_hash: String,
    pub role: Role,
    pub enabled: bool,
}

/// Verified identity produced by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub identifier: String,
    pub role: Role,
    pub enabled: bool,
}

impl Principal {
    pub fn new(identifier: impl Into<String>, role: Role) -> Self {
        Self {
            identifier: identifier.into(),
            role,
            enabled: true,
        }
    }
}

impl From<&Account> for Principal {
    fn from(account: &Account) -> Self {
        Self {
            identifier: account.identifier.clone(),
            role: account.role.clone(),
            enabled: account.enabled,
        }
    }
}
