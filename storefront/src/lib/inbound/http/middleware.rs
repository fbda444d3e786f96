use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use crate::domain::account::models::Principal;
use crate::domain::account::models::Role;
use crate::domain::gate::GateOutcome;
use crate::inbound::http::router::AppState;

/// Request extension holding the principal restored from the session cookie.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal(pub Principal);

/// Middleware that restores the session principal and consults the gate.
///
/// A session cookie that fails validation is ignored and the request continues
/// as anonymous. The stale cookie is left for the next login to overwrite.
pub async fn gate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let principal = restore_principal(&state, &jar);

    match state.gate.check(req.uri().path(), principal.as_ref()) {
        GateOutcome::Proceed => {
            if let Some(principal) = principal {
                req.extensions_mut()
                    .insert(AuthenticatedPrincipal(principal));
            }
            next.run(req).await
        }
        GateOutcome::RedirectToLogin(login_page) => Redirect::to(&login_page).into_response(),
        GateOutcome::RedirectForbidden(forbidden_path) => {
            Redirect::to(&forbidden_path).into_response()
        }
    }
}

fn restore_principal(state: &AppState, jar: &CookieJar) -> Option<Principal> {
    let token = jar.get(&state.cookie.name)?;

    match state.sessions.validate(token.value()) {
        Ok(claims) => Some(Principal::new(claims.sub, Role::parse(&claims.role))),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid session cookie");
            None
        }
    }
}
