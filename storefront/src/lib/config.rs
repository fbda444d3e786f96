use std::collections::HashMap;
use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::access::errors::PatternError;
use crate::domain::access::AccessPolicy;
use crate::domain::access::AccessRule;
use crate::domain::access::Requirement;
use crate::domain::access::UnmatchedPathPolicy;
use crate::domain::account::models::Role;
use crate::domain::gate::GatePaths;
use crate::domain::routing::PostLoginRouter;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub remember_me_expiration_hours: i64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Send the cookie over HTTPS only
    #[serde(default)]
    pub secure_cookie: bool,
}

/// Attributes of the session cookie shared by login, logout and the gate middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookieConfig {
    pub name: String,
    pub secure: bool,
}

impl SessionConfig {
    pub fn cookie(&self) -> SessionCookieConfig {
        SessionCookieConfig {
            name: self.cookie_name.clone(),
            secure: self.secure_cookie,
        }
    }
}

fn default_cookie_name() -> String {
    "STOREFRONT_SESSION".to_string()
}

/// Login form wiring and the access matrix.
///
/// Every key is optional; omitted keys keep the storefront defaults.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SecurityConfig {
    pub login_processing_path: String,
    pub login_page: String,
    pub default_success_path: String,
    pub failure_path: String,
    pub forbidden_path: String,
    pub logout_path: String,
    pub logout_success_path: String,
    pub username_parameter: String,
    pub password_parameter: String,
    pub remember_me_parameter: String,
    pub unmatched_paths: UnmatchedPathPolicy,
    /// Evaluated in order, first match wins
    pub rules: Vec<RuleConfig>,
    /// Role label -> landing page after login
    pub success_destinations: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RuleConfig {
    pub pattern: String,
    pub access: AccessKind,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccessKind {
    Public,
    Authenticated,
    AnyRole,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecurityConfigError {
    #[error("Invalid access rule: {0}")]
    Pattern(#[from] PatternError),

    #[error("Access rule for {0} requires a role but lists none")]
    MissingRoles(String),
}

impl RuleConfig {
    fn new(pattern: &str, access: AccessKind, roles: &[&str]) -> Self {
        Self {
            pattern: pattern.to_string(),
            access,
            roles: roles.iter().map(|role| role.to_string()).collect(),
        }
    }

    fn to_rule(&self) -> Result<AccessRule, SecurityConfigError> {
        let requirement = match self.access {
            AccessKind::Public => Requirement::Public,
            AccessKind::Authenticated => Requirement::authenticated(),
            AccessKind::AnyRole if self.roles.is_empty() => {
                return Err(SecurityConfigError::MissingRoles(self.pattern.clone()))
            }
            AccessKind::AnyRole => {
                Requirement::any_role(self.roles.iter().map(|label| Role::parse(label)))
            }
        };

        Ok(AccessRule::new(&self.pattern, requirement)?)
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            login_processing_path: "/doLogin".to_string(),
            login_page: "/login".to_string(),
            default_success_path: "/?login_success".to_string(),
            failure_path: "/login?error=true".to_string(),
            forbidden_path: "/403".to_string(),
            logout_path: "/logout".to_string(),
            logout_success_path: "/".to_string(),
            username_parameter: "customerId".to_string(),
            password_parameter: "password".to_string(),
            remember_me_parameter: "remember".to_string(),
            unmatched_paths: UnmatchedPathPolicy::Authenticated,
            rules: vec![
                RuleConfig::new("/", AccessKind::Public, &[]),
                RuleConfig::new("/login", AccessKind::Public, &[]),
                RuleConfig::new("/logout", AccessKind::Public, &[]),
                RuleConfig::new("/checkOut", AccessKind::AnyRole, &["USER", "ADMIN"]),
                RuleConfig::new("/admin/**", AccessKind::AnyRole, &["ADMIN"]),
            ],
            success_destinations: HashMap::from([
                ("USER".to_string(), "/cartItem".to_string()),
                ("ADMIN".to_string(), "/admin/home".to_string()),
            ]),
        }
    }
}

impl SecurityConfig {
    /// Build the access matrix from the configured rules.
    ///
    /// # Errors
    /// * `Pattern` - A rule pattern does not parse
    /// * `MissingRoles` - An `any_role` rule lists no roles
    pub fn access_policy(&self) -> Result<AccessPolicy, SecurityConfigError> {
        let rules = self
            .rules
            .iter()
            .map(RuleConfig::to_rule)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AccessPolicy::new(rules, self.unmatched_paths))
    }

    pub fn post_login_router(&self) -> PostLoginRouter {
        PostLoginRouter::new(
            self.success_destinations
                .iter()
                .map(|(label, path)| (Role::parse(label), path.clone())),
        )
    }

    pub fn gate_paths(&self) -> GatePaths {
        GatePaths {
            login_page: self.login_page.clone(),
            login_processing_path: self.login_processing_path.clone(),
            failure_path: self.failure_path.clone(),
            forbidden_path: self.forbidden_path.clone(),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (STOREFRONT_DATABASE__URL, STOREFRONT_SECURITY__LOGIN_PAGE, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(
                Environment::with_prefix("STOREFRONT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        configuration.try_deserialize()
    }
}
