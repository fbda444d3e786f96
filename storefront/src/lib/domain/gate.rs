use std::sync::Arc;

use thiserror::Error;

use crate::domain::access::AccessPolicy;
use crate::domain::access::Decision;
use crate::domain::account::errors::AuthenticationError;
use crate::domain::account::models::Principal;
use crate::domain::account::ports::AuthenticationServicePort;
use crate::domain::routing::PostLoginRouter;
use crate::domain::routing::RoutingError;

/// Values of the remember-me field that switch it on.
const REMEMBER_ME_TRUTHY: [&str; 4] = ["true", "on", "yes", "1"];

/// Paths the gate redirects to or lets through on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatePaths {
    pub login_page: String,
    pub login_processing_path: String,
    pub failure_path: String,
    pub forbidden_path: String,
}

/// What to do with an incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Proceed,
    RedirectToLogin(String),
    RedirectForbidden(String),
}

/// Result of a login submission that the gate could handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated {
        principal: Principal,
        destination: String,
    },
    /// Carries no reason: every failure looks the same from outside.
    Rejected { redirect: String },
}

/// Failures that must stop the request instead of redirecting.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("Security misconfiguration: {0}")]
    Misconfigured(#[from] RoutingError),
}

/// Per-request decision point.
///
/// Every request goes through [`RequestGate::check`]; login submissions through
/// [`RequestGate::login`]. Holds nothing mutable, so one instance serves all
/// requests concurrently.
pub struct RequestGate<A>
where
    A: AuthenticationServicePort + ?Sized,
{
    authentication: Arc<A>,
    policy: AccessPolicy,
    router: PostLoginRouter,
    paths: GatePaths,
}

impl<A> RequestGate<A>
where
    A: AuthenticationServicePort + ?Sized,
{
    pub fn new(
        authentication: Arc<A>,
        policy: AccessPolicy,
        router: PostLoginRouter,
        paths: GatePaths,
    ) -> Self {
        Self {
            authentication,
            policy,
            router,
            paths,
        }
    }

    /// Decide the fate of a request for `path`.
    ///
    /// The gate's own redirect targets are reachable whatever the rules say: the
    /// login page and login processing path for everyone, the forbidden page for
    /// any authenticated principal.
    pub fn check(&self, path: &str, principal: Option<&Principal>) -> GateOutcome {
        if path == self.paths.login_processing_path
            || path == self.paths.login_page
            || (principal.is_some() && path == self.paths.forbidden_path)
        {
            return GateOutcome::Proceed;
        }

        match self.policy.evaluate(path, principal) {
            Decision::Allow => GateOutcome::Proceed,
            Decision::DenyRequireLogin => {
                tracing::debug!(path, "Anonymous request for protected path");
                GateOutcome::RedirectToLogin(self.paths.login_page.clone())
            }
            Decision::DenyForbidden => {
                tracing::info!(
                    path,
                    identifier = principal.map(|p| p.identifier.as_str()),
                    role = principal.map(|p| p.role.as_str()),
                    "Access denied"
                );
                GateOutcome::RedirectForbidden(self.paths.forbidden_path.clone())
            }
        }
    }

    /// Handle a login submission.
    ///
    /// # Errors
    /// * `Misconfigured` - Authentication succeeded but the role has no landing page
    pub async fn login(&self, identifier: &str, password: &str) -> Result<LoginOutcome, GateError> {
        let principal = match self.authentication.authenticate(identifier, password).await {
            Ok(principal) => principal,
            Err(e) => {
                self.log_rejection(identifier, &e);
                return Ok(LoginOutcome::Rejected {
                    redirect: self.paths.failure_path.clone(),
                });
            }
        };

        let destination = self
            .router
            .destination_for(&principal)
            .map_err(|e| {
                tracing::error!(
                    identifier = %principal.identifier,
                    role = %principal.role,
                    error = %e,
                    "Login halted"
                );
                e
            })?
            .to_string();

        tracing::info!(
            identifier = %principal.identifier,
            role = %principal.role,
            destination = %destination,
            "Login succeeded"
        );

        Ok(LoginOutcome::Authenticated {
            principal,
            destination,
        })
    }

    fn log_rejection(&self, identifier: &str, error: &AuthenticationError) {
        match error {
            AuthenticationError::CredentialStore(e) => {
                tracing::error!(identifier, reason = error.reason(), error = %e, "Login failed");
            }
            _ => {
                tracing::info!(identifier, reason = error.reason(), "Login failed");
            }
        }
    }
}

/// Whether a submitted remember-me field asks for a persistent login.
///
/// Absent means no; present counts only with a truthy value.
pub fn remember_me_requested(value: Option<&str>) -> bool {
    value.is_some_and(|value| {
        REMEMBER_ME_TRUTHY
            .iter()
            .any(|truthy| value.trim().eq_ignore_ascii_case(truthy))
    })
}
