//! Placeholder pages for the routes the gate protects.
//!
//! Catalog, cart and admin views live elsewhere; these only confirm who got in.

use std::collections::HashMap;

use axum::extract::Query;
use axum::extract::State;
use axum::http::Uri;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::Extension;

use super::ApiError;
use crate::inbound::http::middleware::AuthenticatedPrincipal;
use crate::inbound::http::router::AppState;

type MaybePrincipal = Option<Extension<AuthenticatedPrincipal>>;

fn greeting(principal: &MaybePrincipal) -> String {
    match principal {
        Some(Extension(AuthenticatedPrincipal(principal))) => {
            format!("Signed in as {} ({})", principal.identifier, principal.role)
        }
        None => "Not signed in".to_string(),
    }
}

pub async fn home(principal: MaybePrincipal) -> Html<String> {
    Html(format!("<h1>Storefront</h1><p>{}</p>", greeting(&principal)))
}

/// Login form. Shows a generic error marker after a failed attempt; already
/// authenticated visitors are sent to the default success page.
pub async fn login_page(
    State(state): State<AppState>,
    principal: MaybePrincipal,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if principal.is_some() {
        return Redirect::to(&state.security.default_success_path).into_response();
    }

    let security = &state.security;
    let error = if query.contains_key("error") {
        r#"<p class="error">Invalid username or password.</p>"#
    } else {
        ""
    };

    Html(format!(
        concat!(
            "<h1>Login</h1>{error}",
            r#"<form method="post" action="{action}">"#,
            r#"<input name="{username}">"#,
            r#"<input name="{password}" type="password">"#,
            r#"<input name="{remember}" type="checkbox" value="true">"#,
            r#"<button type="submit">Login</button></form>"#
        ),
        error = error,
        action = security.login_processing_path,
        username = security.username_parameter,
        password = security.password_parameter,
        remember = security.remember_me_parameter,
    ))
    .into_response()
}

pub async fn forbidden(principal: MaybePrincipal) -> Html<String> {
    Html(format!(
        "<h1>403</h1><p>You do not have permission to view this page.</p><p>{}</p>",
        greeting(&principal)
    ))
}

pub async fn checkout(principal: MaybePrincipal) -> Html<String> {
    Html(format!("<h1>Checkout</h1><p>{}</p>", greeting(&principal)))
}

pub async fn cart(principal: MaybePrincipal) -> Html<String> {
    Html(format!("<h1>Cart</h1><p>{}</p>", greeting(&principal)))
}

pub async fn admin_home(principal: MaybePrincipal) -> Html<String> {
    Html(format!("<h1>Administration</h1><p>{}</p>", greeting(&principal)))
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
