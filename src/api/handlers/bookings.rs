//! Booking (service request) handlers.
//!
//! All routes here run behind `auth_middleware`; the requester identity
//! comes from the validated token, never from the request body.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::BOOKING_TAG;
use crate::api::dto::{BookServiceRequest, BookingResponse};
use crate::api::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::NewServiceRequest;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates the booking routes.
///
/// # Routes
/// - `POST /bookService` - Book a service
/// - `GET /bookings` - List the caller's bookings
/// - `PATCH /bookings/{id}/complete` - Mark a booking completed
pub fn booking_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(book_service))
        .routes(routes!(list_my_bookings))
        .routes(routes!(complete_booking))
}

/// POST /api/bookService - Book a service
///
/// Creates a service request for the authenticated user. A nonexistent
/// category id is rejected with a validation error and creates nothing.
#[utoipa::path(
    post,
    path = "/bookService",
    tag = BOOKING_TAG,
    request_body = BookServiceRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Invalid description or unknown category"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn book_service(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<BookServiceRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let booking = state
        .repos
        .service_requests
        .create(NewServiceRequest {
            description: payload.description,
            category_id: payload.category_id,
            user_id: auth_user.user_id,
        })
        .await?;

    tracing::info!(
        booking_id = booking.id,
        category_id = booking.category_id,
        user_id = booking.user_id,
        "Service booked"
    );

    Ok((StatusCode::CREATED, Json(booking.into())))
}

/// GET /api/bookings - List the caller's bookings
///
/// Newest first.
#[utoipa::path(
    get,
    path = "/bookings",
    tag = BOOKING_TAG,
    responses(
        (status = 200, description = "The caller's bookings", body = Vec<BookingResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn list_my_bookings(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let bookings = state
        .repos
        .service_requests
        .list_for_user(auth_user.user_id)
        .await?;
    let responses: Vec<BookingResponse> =
        bookings.into_iter().map(BookingResponse::from).collect();
    Ok(Json(responses))
}

/// PATCH /api/bookings/{id}/complete - Mark a booking completed
///
/// Allowed for the booking's owner and for admins.
#[utoipa::path(
    patch,
    path = "/bookings/{id}/complete",
    tag = BOOKING_TAG,
    params(
        ("id" = i32, Path, description = "Booking id")
    ),
    responses(
        (status = 200, description = "Booking completed", body = BookingResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller owns neither the booking nor the admin role"),
        (status = 404, description = "No such booking")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn complete_booking(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state
        .repos
        .service_requests
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound {
            entity: "service_request".to_string(),
            field: "id".to_string(),
            value: id.to_string(),
        })?;

    if booking.user_id != auth_user.user_id && !auth_user.is_admin() {
        return Err(AppError::Forbidden {
            message: "Bookings can only be completed by their owner or an admin".to_string(),
        });
    }

    let updated = state.repos.service_requests.mark_completed(id).await?;
    Ok(Json(updated.into()))
}
