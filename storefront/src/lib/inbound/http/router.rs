use std::sync::Arc;
use std::time::Duration;

use auth::SessionManager;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::pages::admin_home;
use super::handlers::pages::cart;
use super::handlers::pages::checkout;
use super::handlers::pages::forbidden;
use super::handlers::pages::home;
use super::handlers::pages::login_page;
use super::handlers::pages::not_found;
use super::middleware::gate as gate_middleware;
use crate::config::SecurityConfig;
use crate::config::SessionCookieConfig;
use crate::domain::account::ports::AuthenticationServicePort;
use crate::domain::gate::RequestGate;

pub type SharedGate = Arc<RequestGate<dyn AuthenticationServicePort>>;

#[derive(Clone)]
pub struct AppState {
    pub gate: SharedGate,
    pub sessions: Arc<SessionManager>,
    pub security: Arc<SecurityConfig>,
    pub cookie: Arc<SessionCookieConfig>,
}

/// Build the storefront router.
///
/// Every route, the fallback included, passes through the gate middleware.
pub fn create_router(
    gate: SharedGate,
    sessions: Arc<SessionManager>,
    security: SecurityConfig,
    cookie: SessionCookieConfig,
) -> Router {
    let state = AppState {
        gate,
        sessions,
        security: Arc::new(security),
        cookie: Arc::new(cookie),
    };

    let security = Arc::clone(&state.security);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/", get(home))
        .route(&security.login_page, get(login_page))
        .route(&security.login_processing_path, post(login))
        .route(&security.logout_path, get(logout).post(logout))
        .route(&security.forbidden_path, get(forbidden))
        .route("/checkOut", get(checkout).post(checkout))
        .route("/cartItem", get(cart))
        .route("/admin/home", get(admin_home))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gate_middleware,
        ))
        .layer(trace_layer)
        .with_state(state)
}
