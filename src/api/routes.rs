//! Router configuration for the API.
//!
//! Centralized route registration and middleware wiring.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    auth_middleware, global_error_handler, logging_middleware, request_id_middleware,
};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// Public routes: registration, login, refresh, category listing, health,
/// Swagger UI. Everything touching a caller identity (booking, "me",
/// catalog administration) sits behind the JWT middleware.
///
/// Middleware layers apply in reverse declaration order, so the request ID
/// is assigned before logging runs, and error-envelope wrapping sees the
/// final response.
pub fn create_router(state: AppState) -> Router {
    let protected = OpenApiRouter::new()
        .merge(handlers::bookings::booking_routes())
        .merge(handlers::me::me_routes())
        .merge(handlers::categories::admin_category_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = OpenApiRouter::new()
        .merge(handlers::auth::auth_routes())
        .merge(handlers::categories::category_routes())
        .merge(protected);

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", api_routes)
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", api))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
