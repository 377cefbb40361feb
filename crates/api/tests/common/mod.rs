#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use contractly_api::auth::identity::JwtIdentityCheck;
use contractly_api::auth::jwt::JwtConfig;
use contractly_api::auth::password::hash_password;
use contractly_api::config::ServerConfig;
use contractly_api::generation::GenerationConfig;
use contractly_api::router::build_app_router;
use contractly_api::state::AppState;
use contractly_core::content::{
    ContentGenerator, ContentRequest, DisabledGenerator, GenerationError,
};
use contractly_core::vendor::VendorType;
use contractly_db::models::user::{CreateUser, User};
use contractly_db::repositories::UserRepo;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "password123";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default),
/// a fixed JWT secret and generation disabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: String::new(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            expiry_hours: 24,
            cookie_secure: false,
        },
        generation: GenerationConfig::disabled(),
    }
}

/// Build the full application router over `pool` with generation disabled.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_generator(pool, Arc::new(DisabledGenerator))
}

/// Build the full application router with a specific content generator.
pub fn build_test_app_with_generator(pool: PgPool, generator: Arc<dyn ContentGenerator>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        identity: Arc::new(JwtIdentityCheck::new(config.jwt.clone())),
        generator,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Always answers with the same text.
pub struct FixedGenerator(pub &'static str);

#[async_trait]
impl ContentGenerator for FixedGenerator {
    async fn generate(&self, _request: &ContentRequest) -> Result<String, GenerationError> {
        Ok(self.0.to_string())
    }
}

/// Always fails as if the upstream service were down.
pub struct FailingGenerator;

#[async_trait]
impl ContentGenerator for FailingGenerator {
    async fn generate(&self, _request: &ContentRequest) -> Result<String, GenerationError> {
        Err(GenerationError::Upstream {
            status: 503,
            body: "service unavailable".to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a vendor with [`TEST_PASSWORD`].
pub async fn create_vendor(pool: &PgPool, email: &str, name: &str, vendor_type: VendorType) -> User {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        name: name.to_string(),
        vendor_type,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Log in through the API and return a `Cookie` header value carrying the
/// session.
pub async fn login_cookie(app: Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    session_from_set_cookie(&response).expect("login must set the session cookie")
}

/// `auth-token=<value>` from a response's `Set-Cookie`, if present.
pub fn session_from_set_cookie(response: &Response) -> Option<String> {
    let header = response.headers().get(SET_COOKIE)?.to_str().ok()?;
    let pair = header.split(';').next()?.trim();
    pair.starts_with("auth-token=").then(|| pair.to_string())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, cookie: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, cookie: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_bearer(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, cookie: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, Some(cookie), body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, cookie: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::PUT, uri, Some(cookie), body)).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
