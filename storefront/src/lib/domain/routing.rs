use std::collections::HashMap;

use thiserror::Error;

use crate::domain::account::models::Principal;
use crate::domain::account::models::Role;

/// Error for post-login routing
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoutingError {
    /// Deployment defect: an account holds a role nobody configured a landing page for.
    #[error("No post-login destination configured for role {0}")]
    UnrecognizedRole(Role),
}

/// Chooses where a freshly authenticated principal lands.
#[derive(Debug, Clone)]
pub struct PostLoginRouter {
    destinations: HashMap<Role, String>,
}

impl PostLoginRouter {
    pub fn new(destinations: impl IntoIterator<Item = (Role, String)>) -> Self {
        Self {
            destinations: destinations.into_iter().collect(),
        }
    }

    /// Destination path for the principal's role.
    ///
    /// # Errors
    /// * `UnrecognizedRole` - No destination for this role. There is no fallback.
    pub fn destination_for(&self, principal: &Principal) -> Result<&str, RoutingError> {
        self.destinations
            .get(&principal.role)
            .map(String::as_str)
            .ok_or_else(|| RoutingError::UnrecognizedRole(principal.role.clone()))
    }
}
