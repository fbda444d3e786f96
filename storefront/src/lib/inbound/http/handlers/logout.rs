use axum::extract::State;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::Extension;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;

use crate::inbound::http::middleware::AuthenticatedPrincipal;
use crate::inbound::http::router::AppState;

/// Drop the session cookie and return to the logout landing page.
pub async fn logout(
    State(state): State<AppState>,
    principal: Option<Extension<AuthenticatedPrincipal>>,
    jar: CookieJar,
) -> impl IntoResponse {
    if let Some(Extension(AuthenticatedPrincipal(principal))) = principal {
        tracing::info!(identifier = %principal.identifier, "Logout");
    }

    let removal = Cookie::build(state.cookie.name.clone()).path("/");
    (
        jar.remove(removal),
        Redirect::to(&state.security.logout_success_path),
    )
}
