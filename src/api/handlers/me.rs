//! Current user (me) endpoints.

use axum::{Extension, Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::UserInfo;
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;

/// Creates the "me" routes (current authenticated user)
///
/// # Authentication
/// Requires JWT authentication via `auth_middleware`.
pub fn me_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_me))
}

/// GET /api/me - Get current user information
///
/// Returns the account behind the bearer token.
#[utoipa::path(
    get,
    path = "/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user information", body = UserInfo),
        (status = 401, description = "Unauthorized - invalid or missing token")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn get_me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserInfo>> {
    let user = state.services.users.get_user(auth_user.user_id).await?;
    Ok(Json(user.into()))
}
