//! Error response DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ValidationFieldError;

/// Standard error response format.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable machine-readable error code
    #[schema(example = "NOT_FOUND")]
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Optional structured details
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub details: Option<serde_json::Value>,
    /// Request ID for log correlation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            request_id: None,
        }
    }

    /// Adds structured details to the error response.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Adds a request ID to the error response for correlation.
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }

    /// Not-found error with entity context.
    pub fn not_found_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "NOT_FOUND",
            &format!("{} with {}={} was not found", entity, field, value),
        )
        .with_details(serde_json::json!({
            "entity": entity,
            "field": field,
            "value": value,
        }))
    }

    /// Duplicate-entry error with entity context.
    pub fn duplicate_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "DUPLICATE_ENTRY",
            &format!("{} with {}='{}' already exists", entity, field, value),
        )
        .with_details(serde_json::json!({
            "entity": entity,
            "field": field,
            "value": value,
        }))
    }

    /// Single-field validation error.
    pub fn validation_error(field: &str, reason: &str) -> Self {
        Self::new("VALIDATION_ERROR", &format!("{}: {}", field, reason)).with_details(
            serde_json::json!({
                "field": field,
                "reason": reason,
            }),
        )
    }

    /// Multi-field request body validation error.
    pub fn validation_errors(errors: &[ValidationFieldError]) -> Self {
        Self::new("VALIDATION_ERROR", "Request validation failed").with_details(
            serde_json::json!({
                "errors": errors,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_empty_optional_fields() {
        let json = serde_json::to_string(&ErrorResponse::new("NOT_FOUND", "missing")).unwrap();
        assert!(!json.contains("details"));
        assert!(!json.contains("request_id"));
    }

    #[test]
    fn duplicate_error_carries_context() {
        let response = ErrorResponse::duplicate_error("users", "username", "alice");
        assert_eq!(response.code, "DUPLICATE_ENTRY");
        let details = response.details.unwrap();
        assert_eq!(details["field"], "username");
        assert_eq!(details["value"], "alice");
    }
}
