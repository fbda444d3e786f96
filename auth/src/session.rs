use chrono::Duration;
use chrono::Utc;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SessionClaims;

/// Issues and validates login session tokens.
///
/// Two lifetimes are configured: the ordinary session, and the longer one granted
/// when the user asks to be remembered.
pub struct SessionManager {
    jwt_handler: JwtHandler,
    session_lifetime: Duration,
    remember_me_lifetime: Duration,
}

/// A freshly signed session.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Signed JWT
    pub token: String,
    pub claims: SessionClaims,
}

impl SessionManager {
    /// Create a session manager.
    ///
    /// # Arguments
    /// * `secret` - Secret key for token signing
    /// * `session_hours` - Lifetime of an ordinary session
    /// * `remember_me_hours` - Lifetime of a remembered session
    pub fn new(secret: &[u8], session_hours: i64, remember_me_hours: i64) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
            session_lifetime: Duration::hours(session_hours),
            remember_me_lifetime: Duration::hours(remember_me_hours),
        }
    }

    /// Sign a session token for an authenticated subject.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue(
        &self,
        subject: &str,
        role: &str,
        remember: bool,
    ) -> Result<IssuedSession, JwtError> {
        let lifetime = if remember {
            self.remember_me_lifetime
        } else {
            self.session_lifetime
        };

        let claims = SessionClaims::new(subject, role, Utc::now(), lifetime, remember);
        let token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedSession { token, claims })
    }

    /// Validate a session token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, tampered with, or expired
    pub fn validate(&self, token: &str) -> Result<SessionClaims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
