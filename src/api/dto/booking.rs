//! Booking (service request) DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::ServiceRequest;

/// Request body for booking a service.
///
/// The requesting user is taken from the bearer token, never from the
/// body. `categoryId` keeps the wire name clients already send.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct BookServiceRequest {
    /// What needs doing
    #[validate(length(min = 1, max = 2000, message = "Description must be between 1 and 2000 characters"))]
    #[schema(example = "Leaky faucet", min_length = 1, max_length = 2000)]
    pub description: String,
    /// Category being booked
    #[serde(rename = "categoryId")]
    #[schema(example = 2)]
    pub category_id: i32,
}

/// Response body for a booking.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Leaky faucet")]
    pub description: String,
    #[schema(example = 2)]
    pub category_id: i32,
    #[schema(example = 1)]
    pub user_id: i32,
    /// Creation time (ISO 8601)
    #[schema(example = "2026-08-08T10:15:30")]
    pub requested_at: String,
    #[schema(example = false)]
    pub completed: bool,
}

impl From<ServiceRequest> for BookingResponse {
    fn from(request: ServiceRequest) -> Self {
        Self {
            id: request.id,
            description: request.description,
            category_id: request.category_id,
            user_id: request.user_id,
            requested_at: request.requested_at.to_string(),
            completed: request.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_response_formats_timestamp() {
        let request = ServiceRequest {
            id: 7,
            description: "Leaky faucet".to_string(),
            requested_at: jiff::civil::date(2026, 8, 8).at(10, 15, 30, 0),
            completed: false,
            category_id: 2,
            user_id: 1,
        };

        let response = BookingResponse::from(request);
        assert_eq!(response.requested_at, "2026-08-08T10:15:30");
        assert!(!response.completed);
        assert_eq!(response.category_id, 2);
    }

    #[test]
    fn book_request_accepts_camel_case_category_id() {
        let payload: BookServiceRequest =
            serde_json::from_str(r#"{"description": "Leaky faucet", "categoryId": 2}"#).unwrap();
        assert_eq!(payload.category_id, 2);
        assert_eq!(payload.description, "Leaky faucet");
    }
}
