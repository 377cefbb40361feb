//! Handlers for the `/auth` resource (login, logout, me).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderName, StatusCode};
use contractly_core::error::CoreError;
use contractly_core::identity::Identity;
use contractly_db::models::user::UserResponse;
use contractly_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::jwt::generate_token;
use crate::auth::password::verify_login;
use crate::auth::session::{clear_session_cookie, session_cookie};
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Same message for unknown email and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Sets the `auth-token` session cookie
/// and returns the vendor's public profile.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<([(HeaderName, String); 1], Json<DataResponse<UserResponse>>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(format!("Invalid login request: {e}")))?;

    let invalid = || AppError::Core(CoreError::Unauthenticated(INVALID_CREDENTIALS.into()));

    let user = UserRepo::find_by_email(&state.pool, &input.email).await?;
    let password_valid = verify_login(&input.password, user.as_ref().map(|u| u.password_hash.as_str()))
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    let user = match user {
        Some(user) if password_valid => user,
        Some(user) => {
            tracing::info!(user_id = user.id, "Login rejected: wrong password");
            return Err(invalid());
        }
        None => {
            tracing::info!("Login rejected: unknown email");
            return Err(invalid());
        }
    };

    let identity = user.identity()?;
    let token = generate_token(&identity, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, vendor_type = %identity.vendor_type, "Vendor logged in");

    let cookie = session_cookie(&token, &state.config.jwt);
    let profile = UserResponse::try_from(&user)?;
    Ok(([(SET_COOKIE, cookie)], Json(DataResponse { data: profile })))
}

/// POST /api/v1/auth/logout
///
/// Expire the session cookie. Succeeds with or without a session.
pub async fn logout(State(state): State<AppState>) -> (StatusCode, [(HeaderName, String); 1]) {
    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, clear_session_cookie(&state.config.jwt))],
    )
}

/// GET /api/v1/auth/me
pub async fn me(AuthUser(identity): AuthUser) -> Json<DataResponse<Identity>> {
    Json(DataResponse { data: identity })
}
