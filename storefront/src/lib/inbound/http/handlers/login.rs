use std::collections::HashMap;

use auth::IssuedSession;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::Form;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;

use super::ApiError;
use crate::config::SessionCookieConfig;
use crate::domain::gate::remember_me_requested;
use crate::domain::gate::LoginOutcome;
use crate::inbound::http::router::AppState;

/// Login form submission.
///
/// Field names come from configuration, so the form is read as a plain map.
/// Missing fields count as empty and fail like any other bad credentials.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let security = &state.security;
    let identifier = field(&form, &security.username_parameter).unwrap_or_default();
    let password = field(&form, &security.password_parameter).unwrap_or_default();
    let remember = remember_me_requested(field(&form, &security.remember_me_parameter));

    match state.gate.login(identifier, password).await? {
        LoginOutcome::Authenticated {
            principal,
            destination,
        } => {
            let session = state
                .sessions
                .issue(&principal.identifier, principal.role.as_str(), remember)
                .map_err(|e| {
                    tracing::error!(
                        identifier = %principal.identifier,
                        error = %e,
                        "Session issuance failed"
                    );
                    ApiError::internal()
                })?;

            let cookie = session_cookie(&state.cookie, session);
            Ok((jar.add(cookie), Redirect::to(&destination)).into_response())
        }
        LoginOutcome::Rejected { redirect } => {
            let removal = Cookie::build(state.cookie.name.clone()).path("/");
            Ok((jar.remove(removal), Redirect::to(&redirect)).into_response())
        }
    }
}

fn field<'a>(form: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    form.get(name).map(String::as_str)
}

/// Session cookie for a freshly issued token.
///
/// Ordinary sessions end with the browser; remembered ones persist for the token
/// lifetime.
fn session_cookie(settings: &SessionCookieConfig, session: IssuedSession) -> Cookie<'static> {
    let remember = session.claims.remember;
    let lifetime = time::Duration::seconds(session.claims.lifetime_seconds());

    let mut cookie = Cookie::build((settings.name.clone(), session.token))
        .path("/")
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Lax)
        .build();

    if remember {
        cookie.set_max_age(lifetime);
    }

    cookie
}
