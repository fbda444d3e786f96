mod common;

use common::location;
use common::session_cookie;
use common::session_set_cookies;
use common::TestApp;
use common::COOKIE_NAME;
use reqwest::StatusCode;
use storefront::access::UnmatchedPathPolicy;
use storefront::config::SecurityConfig;

#[tokio::test]
async fn test_public_pages_are_reachable_anonymously() {
    let app = TestApp::spawn().await;

    for path in ["/", "/login"] {
        let response = app.get(path).send().await.expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK, "GET {}", path);
    }
}

#[tokio::test]
async fn test_anonymous_request_to_protected_path_redirects_to_login() {
    let app = TestApp::spawn().await;

    for path in ["/checkOut", "/cartItem", "/admin/home", "/admin", "/anything/else"] {
        let response = app.get(path).send().await.expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "GET {}", path);
        assert_eq!(location(&response).as_deref(), Some("/login"), "GET {}", path);
    }
}

#[tokio::test]
async fn test_user_login_lands_on_cart() {
    let app = TestApp::spawn().await;

    let response = app.login("a@b.com", "secret", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/cartItem"));

    let cookie = session_cookie(&response).expect("Missing session cookie");
    let header = session_set_cookies(&response).remove(0);
    assert!(header.contains("HttpOnly"));
    assert!(header.contains("Path=/"));
    assert!(!header.contains("Max-Age"));

    let token = cookie.trim_start_matches(&format!("{}=", COOKIE_NAME));
    let claims = app.sessions.validate(token).expect("Token should validate");
    assert_eq!(claims.sub, "a@b.com");
    assert_eq!(claims.role, "USER");
    assert!(!claims.remember);
}

#[tokio::test]
async fn test_user_can_check_out_but_not_administer() {
    let app = TestApp::spawn().await;
    let cookie = app.login_session("a@b.com", "secret").await;

    let response = app
        .get_with_session("/checkOut", &cookie)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Signed in as a@b.com (USER)"));

    let response = app
        .post("/checkOut")
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .get_with_session("/cartItem", &cookie)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .get_with_session("/admin/home", &cookie)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/403"));

    let response = app
        .get_with_session("/403", &cookie)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_login_lands_on_admin_home() {
    let app = TestApp::spawn().await;

    let response = app.login("admin@b.com", "admin-secret", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/admin/home"));
    let cookie = session_cookie(&response).expect("Missing session cookie");

    for path in ["/admin/home", "/checkOut"] {
        let response = app
            .get_with_session(path, &cookie)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK, "GET {}", path);
    }

    // Allowed through the gate, but nothing serves it
    let response = app
        .get_with_session("/admin/reports", &cookie)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status_code"], 404);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;

    let attempts = [
        ("a@b.com", "wrong"),
        ("nobody@b.com", "secret"),
        ("disabled@b.com", "secret"),
        ("", ""),
    ];

    for (identifier, password) in attempts {
        let response = app.login(identifier, password, None).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", identifier);
        assert_eq!(
            location(&response).as_deref(),
            Some("/login?error=true"),
            "{}",
            identifier
        );
        assert!(session_cookie(&response).is_none(), "{}", identifier);
    }
}

#[tokio::test]
async fn test_login_with_missing_fields_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/doLogin")
        .form(&[("unrelated", "value")])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/login?error=true"));
}

#[tokio::test]
async fn test_failed_login_page_shows_generic_error() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/login?error=true")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Invalid username or password."));
    assert!(body.contains(r#"name="customerId""#));
}

#[tokio::test]
async fn test_remember_me_extends_session_cookie() {
    let app = TestApp::spawn().await;

    let response = app.login("a@b.com", "secret", Some("on")).await;
    assert_eq!(location(&response).as_deref(), Some("/cartItem"));

    let header = session_set_cookies(&response).remove(0);
    assert!(header.contains("Max-Age=1209600"), "{}", header);

    let cookie = session_cookie(&response).unwrap();
    let token = cookie.trim_start_matches(&format!("{}=", COOKIE_NAME));
    assert!(app.sessions.validate(token).unwrap().remember);
}

#[tokio::test]
async fn test_unrecognized_role_is_a_server_error() {
    let app = TestApp::spawn().await;

    let response = app.login("manager@b.com", "secret", None).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(location(&response).is_none());
    assert!(session_cookie(&response).is_none());

    let body = response.text().await.unwrap();
    assert!(!body.contains("MANAGER"), "{}", body);
}

#[tokio::test]
async fn test_logout_clears_session_cookie() {
    let app = TestApp::spawn().await;
    let cookie = app.login_session("a@b.com", "secret").await;

    let response = app
        .get_with_session("/logout", &cookie)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/"));
    let header = session_set_cookies(&response).remove(0);
    assert!(header.contains("Max-Age=0"), "{}", header);
}

#[tokio::test]
async fn test_tampered_session_cookie_is_treated_as_anonymous() {
    let app = TestApp::spawn().await;
    let cookie = app.login_session("a@b.com", "secret").await;
    let tampered = format!("{}x", cookie);

    let response = app
        .get_with_session("/cartItem", &tampered)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_authenticated_visit_to_login_page_redirects_to_default_success() {
    let app = TestApp::spawn().await;
    let cookie = app.login_session("a@b.com", "secret").await;

    let response = app
        .get_with_session("/login", &cookie)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/?login_success"));
}

#[tokio::test]
async fn test_configured_form_field_names_are_honored() {
    let app = TestApp::spawn_with(SecurityConfig {
        username_parameter: "email".to_string(),
        password_parameter: "pass".to_string(),
        ..SecurityConfig::default()
    })
    .await;

    let response = app.login("a@b.com", "secret", None).await;
    assert_eq!(location(&response).as_deref(), Some("/cartItem"));

    // The default field names no longer carry credentials
    let response = app
        .post("/doLogin")
        .form(&[("customerId", "a@b.com"), ("password", "secret")])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(location(&response).as_deref(), Some("/login?error=true"));
}

#[tokio::test]
async fn test_forbidden_page_is_reachable_when_unmatched_paths_are_denied() {
    let app = TestApp::spawn_with(SecurityConfig {
        unmatched_paths: UnmatchedPathPolicy::Deny,
        ..SecurityConfig::default()
    })
    .await;
    let cookie = app.login_session("a@b.com", "secret").await;

    let response = app
        .get_with_session("/admin/home", &cookie)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let forbidden = location(&response).expect("Missing redirect");
    assert_eq!(forbidden, "/403");

    let response = app
        .get_with_session(&forbidden, &cookie)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("Signed in as a@b.com (USER)"));
}
