//! Request extractors whose rejections use the service's error envelope.
//!
//! Every body or path rejection becomes a 400 `VALIDATION_ERROR` carrying
//! axum's rejection text.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use contractly_core::error::CoreError;
use serde::Serialize;

use crate::error::AppError;

/// JSON body extractor and response.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Path parameter extractor.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        AppError::Core(CoreError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected path parameter");
        AppError::Core(CoreError::Validation(rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, Request, StatusCode};

    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Counter {
        #[allow(dead_code)]
        count: u32,
    }

    async fn extract(body: &str) -> Result<Json<Counter>, AppError> {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        Json::<Counter>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn wrong_json_type_is_a_validation_error() {
        let err = extract(r#"{"count": true}"#).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn syntax_error_is_a_validation_error() {
        let err = extract("{not json").await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn well_formed_body_is_extracted() {
        assert!(extract(r#"{"count": 3}"#).await.is_ok());
    }
}
