//! Service category catalog handlers.

use axum::{Extension, Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CATEGORY_TAG;
use crate::api::dto::{CategoryResponse, CreateCategoryRequest};
use crate::api::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Public catalog routes.
///
/// # Routes
/// - `GET /services` - List all categories (no authentication)
pub fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(list_categories))
}

/// Admin catalog routes, wrapped in `auth_middleware` by the router.
///
/// # Routes
/// - `POST /services` - Create a category (admin role)
pub fn admin_category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(create_category))
}

/// GET /api/services - List all service categories
///
/// Returns the full catalog, unpaginated, ordered by id.
#[utoipa::path(
    get,
    path = "/services",
    tag = CATEGORY_TAG,
    responses(
        (status = 200, description = "All service categories", body = Vec<CategoryResponse>)
    )
)]
async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryResponse>>> {
    let categories = state.repos.categories.list_all().await?;
    let responses: Vec<CategoryResponse> =
        categories.into_iter().map(CategoryResponse::from).collect();
    Ok(Json(responses))
}

/// POST /api/services - Create a service category
///
/// Admin only. Category names are unique.
#[utoipa::path(
    post,
    path = "/services",
    tag = CATEGORY_TAG,
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not an admin"),
        (status = 409, description = "Category name already exists")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn create_category(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<CategoryResponse>)> {
    if !auth_user.is_admin() {
        return Err(AppError::Forbidden {
            message: "Only admins can manage the service catalog".to_string(),
        });
    }

    let category = state
        .repos
        .categories
        .create(payload.into_new_category())
        .await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}
