//! Authentication utilities library
//!
//! Provides the credential and session primitives the storefront gate is built on:
//! - Password hashing (Argon2id)
//! - JWT encoding and validation
//! - Session token issuance with ordinary and remember-me lifetimes
//!
//! The library knows nothing about accounts, roles or URLs; the service adapts it.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Sessions
//! ```
//! use auth::SessionManager;
//!
//! let sessions = SessionManager::new(b"secret_key_at_least_32_bytes_long!", 2, 24 * 14);
//! let issued = sessions.issue("a@b.com", "USER", false).unwrap();
//! let claims = sessions.validate(&issued.token).unwrap();
//! assert_eq!(claims.sub, "a@b.com");
//! ```

pub mod jwt;
pub mod password;
pub mod session;

// Re-export commonly used items
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use session::IssuedSession;
pub use session::SessionManager;
