//! HTTP-level integration tests for login, logout and session resolution.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use common::{
    body_json, create_vendor, get, get_auth, get_bearer, login_cookie, post_json,
    session_from_set_cookie, TEST_PASSWORD,
};
use contractly_core::vendor::VendorType;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login sets an HttpOnly session cookie and returns the profile.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let user = create_vendor(&pool, "caterer@test.com", "Sarah Johnson", VendorType::Caterer).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "caterer@test.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("login must set a cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("auth-token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=86400"));

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user.id);
    assert_eq!(json["data"]["email"], "caterer@test.com");
    assert_eq!(json["data"]["name"], "Sarah Johnson");
    assert_eq!(json["data"]["vendor_type"], "caterer");
    assert!(json["data"].get("password_hash").is_none());
}

/// Wrong password and unknown email are indistinguishable.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_rejections_are_uniform(pool: PgPool) {
    create_vendor(&pool, "florist@test.com", "Mike Davis", VendorType::Florist).await;
    let app = common::build_test_app(pool);

    let wrong_password = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "florist@test.com", "password": "nope" }),
    )
    .await;
    let unknown_email = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "nobody@test.com", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert!(session_from_set_cookie(&wrong_password).is_none());

    let a = body_json(wrong_password).await;
    let b = body_json(unknown_email).await;
    assert_eq!(a, b);
    assert_eq!(a["error"], "Invalid credentials");
    assert_eq!(a["code"], "UNAUTHENTICATED");
}

/// Malformed login input is rejected before any lookup.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_validates_input(pool: PgPool) {
    let app = common::build_test_app(pool);

    let bad_email = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "not-an-email", "password": "x" }),
    )
    .await;
    assert_eq!(bad_email.status(), StatusCode::BAD_REQUEST);

    let empty_password = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "a@test.com", "password": "" }),
    )
    .await;
    assert_eq!(empty_password.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Session resolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_resolves_cookie_identity(pool: PgPool) {
    let user = create_vendor(&pool, "photographer@test.com", "John Smith", VendorType::Photographer).await;
    let app = common::build_test_app(pool);

    let cookie = login_cookie(app.clone(), "photographer@test.com").await;
    let response = get_auth(app, "/api/v1/auth/me", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], user.id);
    assert_eq!(json["data"]["name"], "John Smith");
    assert_eq!(json["data"]["vendor_type"], "photographer");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bearer_token_is_accepted(pool: PgPool) {
    create_vendor(&pool, "photographer@test.com", "John Smith", VendorType::Photographer).await;
    let app = common::build_test_app(pool);

    let cookie = login_cookie(app.clone(), "photographer@test.com").await;
    let token = cookie.trim_start_matches("auth-token=");
    let response = get_bearer(app, "/api/v1/auth/me", token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_or_bad_credentials_are_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let missing = get(app.clone(), "/api/v1/auth/me").await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(missing).await;
    assert_eq!(json["code"], "UNAUTHENTICATED");

    let forged = get_auth(app.clone(), "/api/v1/auth/me", "auth-token=forged.token.value").await;
    assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);

    let protected = get(app, "/api/v1/contracts").await;
    assert_eq!(protected.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_expires_cookie(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/auth/logout", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with("auth-token=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}
