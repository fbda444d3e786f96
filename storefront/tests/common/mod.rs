use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::SessionManager;
use reqwest::header::LOCATION;
use reqwest::header::SET_COOKIE;
use storefront::config::SecurityConfig;
use storefront::config::SessionCookieConfig;
use storefront::domain::account::errors::CredentialStoreError;
use storefront::domain::account::models::Account;
use storefront::domain::account::models::Role;
use storefront::domain::account::ports::AuthenticationServicePort;
use storefront::domain::account::ports::CredentialStore;
use storefront::domain::account::service::AuthenticationService;
use storefront::domain::gate::RequestGate;
use storefront::inbound::http::router::create_router;

pub const COOKIE_NAME: &str = "STOREFRONT_SESSION";
pub const SESSION_SECRET: &[u8] = b"test-secret-key-for-session-signing-at-least-32-bytes";
pub const REMEMBER_ME_HOURS: i64 = 336;

/// Credential store backed by a map, seeded once per test app
pub struct InMemoryCredentialStore {
    accounts: HashMap<String, Account>,
}

impl InMemoryCredentialStore {
    /// Seed the store with the storefront test accounts:
    /// - `a@b.com` / `secret`, USER
    /// - `admin@b.com` / `admin-secret`, ADMIN
    /// - `disabled@b.com` / `secret`, USER, disabled
    /// - `manager@b.com` / `secret`, ROLE_MANAGER (no landing page)
    pub fn seeded() -> Self {
        let hasher = PasswordHasher::new();
        let account = |identifier: &str, password: &str, role: &str, enabled: bool| Account {
            identifier: identifier.to_string(),
            password_hash: hasher.hash(password).expect("Failed to hash password"),
            role: Role::parse(role),
            enabled,
        };

        let accounts = [
            account("a@b.com", "secret", "USER", true),
            account("admin@b.com", "admin-secret", "ROLE_ADMIN", true),
            account("disabled@b.com", "secret", "USER", false),
            account("manager@b.com", "secret", "ROLE_MANAGER", true),
        ];

        Self {
            accounts: accounts
                .into_iter()
                .map(|account| (account.identifier.clone(), account))
                .collect(),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>, CredentialStoreError> {
        Ok(self.accounts.get(identifier).cloned())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub security: SecurityConfig,
    pub sessions: SessionManager,
}

impl TestApp {
    /// Spawn the application with the default storefront security settings
    pub async fn spawn() -> Self {
        Self::spawn_with(SecurityConfig::default()).await
    }

    /// Spawn the application in a background task with custom security settings
    pub async fn spawn_with(security: SecurityConfig) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryCredentialStore::seeded());
        let authentication: Arc<dyn AuthenticationServicePort> =
            Arc::new(AuthenticationService::new(store));
        let gate = Arc::new(RequestGate::new(
            authentication,
            security.access_policy().expect("Invalid access rules"),
            security.post_login_router(),
            security.gate_paths(),
        ));
        let sessions = Arc::new(SessionManager::new(SESSION_SECRET, 2, REMEMBER_ME_HOURS));

        let cookie = SessionCookieConfig {
            name: COOKIE_NAME.to_string(),
            secure: false,
        };

        let router = create_router(gate, sessions, security.clone(), cookie);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("Failed to create reqwest client"),
            security,
            sessions: SessionManager::new(SESSION_SECRET, 2, REMEMBER_ME_HOURS),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request carrying a session cookie (`NAME=value`)
    pub fn get_with_session(&self, path: &str, cookie: &str) -> reqwest::RequestBuilder {
        self.get(path).header(reqwest::header::COOKIE, cookie)
    }

    /// Submit the login form using the configured field names
    pub async fn login(
        &self,
        identifier: &str,
        password: &str,
        remember: Option<&str>,
    ) -> reqwest::Response {
        let mut form = vec![
            (self.security.username_parameter.as_str(), identifier),
            (self.security.password_parameter.as_str(), password),
        ];
        if let Some(remember) = remember {
            form.push((self.security.remember_me_parameter.as_str(), remember));
        }

        self.post(&self.security.login_processing_path)
            .form(&form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the session cookie, panicking if none was issued
    pub async fn login_session(&self, identifier: &str, password: &str) -> String {
        let response = self.login(identifier, password, None).await;
        session_cookie(&response).expect("Login did not issue a session cookie")
    }
}

/// Redirect target of a response, if any
pub fn location(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(LOCATION)
        .map(|value| value.to_str().unwrap().to_string())
}

/// All Set-Cookie headers for the session cookie
pub fn session_set_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .filter(|value| value.starts_with(&format!("{}=", COOKIE_NAME)))
        .collect()
}

/// Non-empty session cookie set by a response, as `NAME=value`
pub fn session_cookie(response: &reqwest::Response) -> Option<String> {
    session_set_cookies(response)
        .into_iter()
        .filter_map(|header| header.split(';').next().map(str::to_string))
        .find(|pair| pair.len() > COOKIE_NAME.len() + 1)
}
