use std::sync::Arc;

use auth::SessionManager;
use sqlx::postgres::PgPoolOptions;
use storefront::config::Config;
use storefront::domain::account::ports::AuthenticationServicePort;
use storefront::domain::account::service::AuthenticationService;
use storefront::domain::gate::RequestGate;
use storefront::inbound::http::router::create_router;
use storefront::outbound::repositories::PostgresCredentialStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "storefront",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        login_page = %config.security.login_page,
        login_processing_path = %config.security.login_processing_path,
        rules = config.security.rules.len(),
        unmatched_paths = ?config.security.unmatched_paths,
        "Configuration loaded"
    );

    // Refuse to start on a broken access matrix
    let policy = config.security.access_policy()?;
    let router = config.security.post_login_router();

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let credential_store = Arc::new(PostgresCredentialStore::new(pg_pool));
    let authentication: Arc<dyn AuthenticationServicePort> =
        Arc::new(AuthenticationService::new(credential_store));
    let gate = Arc::new(RequestGate::new(
        authentication,
        policy,
        router,
        config.security.gate_paths(),
    ));

    let sessions = Arc::new(SessionManager::new(
        config.session.secret.as_bytes(),
        config.session.expiration_hours,
        config.session.remember_me_expiration_hours,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        gate,
        sessions,
        config.security.clone(),
        config.session.cookie(),
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
