//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::body::Bytes;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// The body is decoded as JSON whatever the `Content-Type` header says, so plain
/// `curl -d` requests work. A body that cannot be decoded into `T` (bad syntax,
/// wrong types) is rejected with an empty `400`. A decoded body that fails
/// `Validate` is rejected with `400` and the list of field errors.
///
/// # Example
/// ```ignore
/// use axum_helpers::ValidatedJson;
///
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUser>) -> String {
///     format!("Creating user: {}", payload.name)
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        let Json(data) = Json::<T>::from_bytes(&bytes)?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Payload {
        #[serde(default)]
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            post(|ValidatedJson(p): ValidatedJson<Payload>| async move { p.name }),
        )
    }

    fn request(body: &'static str, content_type: Option<&str>) -> http::Request<Body> {
        let mut builder = http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        builder.body(Body::from(body)).unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn test_valid_payload_passes_through() {
        let response = app()
            .oneshot(request(r#"{"name":"Alice"}"#, Some("application/json")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"Alice");
    }

    #[tokio::test]
    async fn test_syntax_error_is_empty_400() {
        let response = app()
            .oneshot(request("{not json", Some("application/json")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_content_type_is_not_required() {
        for content_type in [None, Some("application/x-www-form-urlencoded"), Some("text/plain")] {
            let response = app()
                .oneshot(request(r#"{"name":"Alice"}"#, content_type))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{content_type:?}");
            assert_eq!(body_bytes(response).await, b"Alice");
        }
    }

    #[tokio::test]
    async fn test_wrong_type_is_empty_400() {
        let response = app().oneshot(request(r#"{"name":42}"#, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_validation_failure_lists_fields() {
        let response = app()
            .oneshot(request("{}", Some("application/json")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(
            body,
            serde_json::json!([{"message": "name is required", "field": "name"}])
        );
    }
}
