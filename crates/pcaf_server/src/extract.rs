//! Request extractors
//!
//! [`ApiJson`] wraps axum's `Json` extractor so that body rejections are
//! answered with the same `{success, code, error}` body as every other
//! failure, status 400.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::error::ApiError;

/// JSON body extractor rejecting with [`ApiError::InvalidBody`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        value: f64,
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_is_extracted() {
        let ApiJson(payload) =
            ApiJson::<Payload>::from_request(request(Some("application/json"), r#"{"value": 2.5}"#), &())
                .await
                .unwrap();
        assert_eq!(payload.value, 2.5);
    }

    #[tokio::test]
    async fn test_type_mismatch_is_400_invalid_body() {
        let err = ApiJson::<Payload>::from_request(
            request(Some("application/json"), r#"{"value": "high"}"#),
            &(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), "invalid_body");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_400() {
        let err = ApiJson::<Payload>::from_request(request(None, r#"{"value": 1}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("Invalid request body"));
    }
}
