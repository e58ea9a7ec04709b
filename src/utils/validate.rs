use axum::Json;
use axum::extract::{FromRequest, Request, rejection::JsonRejection};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// JSON extractor that runs `validator` rules after deserialization.
///
/// Deserialization failures surface as `BadRequest`; rule violations as
/// `ValidationErrors` with per-field messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;
    use validator::Validate;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct TestPayload {
        #[validate(length(min = 3, max = 20, message = "Username must be between 3 and 20 characters"))]
        username: String,
        #[validate(length(min = 6, max = 72, message = "Password must be between 6 and 72 characters"))]
        password: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_payload() {
        let request = json_request(r#"{"username": "alice", "password": "secret1"}"#);

        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;

        let ValidatedJson(payload) = result.expect("valid payload should pass");
        assert_eq!(payload.username, "alice");
        assert_eq!(payload.password, "secret1");
    }

    #[tokio::test]
    async fn rejects_short_username() {
        let request = json_request(r#"{"username": "ab", "password": "secret1"}"#);

        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;

        match result.unwrap_err() {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "username");
                assert!(errors[0].message.contains("between 3 and 20"));
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn collects_multiple_field_errors() {
        let request = json_request(r#"{"username": "ab", "password": "pw"}"#);

        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;

        match result.unwrap_err() {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 2);
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"username"));
                assert!(fields.contains(&"password"));
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn rejects_missing_field_as_bad_request() {
        let request = json_request(r#"{"username": "alice"}"#);

        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;

        match result.unwrap_err() {
            AppError::BadRequest { message } => assert!(!message.is_empty()),
            other => panic!("Expected BadRequest, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn rejects_wrong_content_type() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from(r#"{"username": "alice", "password": "secret1"}"#))
            .unwrap();

        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;

        assert!(matches!(result.unwrap_err(), AppError::BadRequest { .. }));
    }
}
