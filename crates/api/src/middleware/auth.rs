//! Request extractor for the signed-in vendor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use contractly_core::error::CoreError;
use contractly_core::identity::Identity;

use crate::auth::session::credential_from_headers;
use crate::error::AppError;
use crate::state::AppState;

/// The vendor behind the request, resolved through [`AppState::identity`].
///
/// Handlers that take this never run for anonymous requests: a missing,
/// malformed, expired or forged credential is a 401 before the body is read.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let unauthenticated =
            || AppError::Core(CoreError::Unauthenticated("Authentication required".into()));

        let credential = credential_from_headers(&parts.headers).ok_or_else(unauthenticated)?;
        let identity = state
            .identity
            .resolve(&credential)
            .await
            .ok_or_else(unauthenticated)?;

        Ok(AuthUser(identity))
    }
}
