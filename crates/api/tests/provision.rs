//! Integration tests for demo vendor provisioning.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};
use contractly_api::provision::{provision_demo_vendors, DEMO_PASSWORD, DEMO_VENDORS};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_provisioning_is_idempotent(pool: PgPool) {
    let first = provision_demo_vendors(&pool).await.unwrap();
    assert_eq!(first.inserted, DEMO_VENDORS.len());
    assert_eq!(first.skipped, 0);

    let second = provision_demo_vendors(&pool).await.unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, DEMO_VENDORS.len());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_demo_vendor_can_log_in(pool: PgPool) {
    provision_demo_vendors(&pool).await.unwrap();
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "caterer@test.com", "password": DEMO_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Sarah Johnson");
    assert_eq!(json["data"]["vendor_type"], "caterer");
}
