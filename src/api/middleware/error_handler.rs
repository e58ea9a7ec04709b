//! Error handler for converting AppError to HTTP responses.
//!
//! Implements `IntoResponse` for `AppError` so handlers can bubble errors
//! with `?`, and provides a fallback middleware that wraps non-JSON error
//! responses (e.g. unknown routes, method mismatches) in the same envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - NotFound → 404
    /// - Duplicate → 409
    /// - Validation / ValidationErrors / BadRequest → 400
    /// - Unauthorized → 401
    /// - Forbidden → 403
    /// - ConnectionPool → 503
    /// - Database / Configuration / Internal → 500
    ///
    /// Internal sources are logged, never serialized into the response.
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            AppError::NotFound {
                entity,
                field,
                value,
            } => (
                StatusCode::NOT_FOUND,
                ErrorResponse::not_found_error(entity, field, value),
            ),
            AppError::Duplicate {
                entity,
                field,
                value,
            } => (
                StatusCode::CONFLICT,
                ErrorResponse::duplicate_error(entity, field, value),
            ),
            AppError::Validation { field, reason } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::validation_error(field, reason),
            ),
            AppError::ValidationErrors { errors } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::validation_errors(errors),
            ),
            AppError::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("BAD_REQUEST", message),
            ),
            AppError::Unauthorized { message } => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("UNAUTHORIZED", message),
            ),
            AppError::Forbidden { message } => (
                StatusCode::FORBIDDEN,
                ErrorResponse::new("FORBIDDEN", message),
            ),
            AppError::Database { operation, source } => {
                tracing::error!(operation = %operation, error = %source, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "DATABASE_ERROR",
                        &format!("Database operation failed: {}", operation),
                    )
                    .with_details(json!({ "operation": operation })),
                )
            }
            AppError::Configuration { key, source } => {
                tracing::error!(key = %key, error = %source, "Configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("CONFIGURATION_ERROR", &format!("Configuration error: {}", key)),
                )
            }
            AppError::ConnectionPool { source } => {
                tracing::error!(error = %source, "Connection pool error");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::new("SERVICE_UNAVAILABLE", "Database connection unavailable"),
                )
            }
            AppError::Internal { source } => {
                tracing::error!(error = %source, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Fallback middleware converting plain error responses into the JSON
/// envelope.
///
/// Responses produced by `AppError` are already JSON and pass through
/// untouched; this catches axum's built-in text responses for unknown
/// routes, method mismatches, and similar.
pub async fn global_error_handler(
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let (_parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let original_message = String::from_utf8_lossy(&body_bytes).trim().to_string();

    let code = status
        .canonical_reason()
        .unwrap_or("UNKNOWN_ERROR")
        .to_uppercase()
        .replace(' ', "_");
    let message = if original_message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("An unknown error occurred")
            .to_string()
    } else {
        original_message
    };

    (status, Json(ErrorResponse::new(&code, &message))).into_response()
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_maps_to_conflict() {
        let error = AppError::Duplicate {
            entity: "users".to_string(),
            field: "username".to_string(),
            value: "alice".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::CONFLICT);
        assert_eq!(error.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn fk_validation_maps_to_bad_request() {
        let error = AppError::Validation {
            field: "category_id".to_string(),
            reason: "Invalid reference to service_categories with value '999'".to_string(),
        };
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let error = AppError::Unauthorized {
            message: "Invalid username or password".to_string(),
        };
        assert_eq!(error.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn internal_sources_are_not_leaked() {
        let error = AppError::Internal {
            source: anyhow::anyhow!("secret database password"),
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
