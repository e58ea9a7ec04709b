//! Authentication handlers for registration, login, and token refresh.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{
    LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse, RegisterRequest,
    RegisterResponse,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::jwt::{generate_token_pair, validate_refresh_token};
use crate::utils::validate::ValidatedJson;

/// Creates the account routes, mounted under `/users`
///
/// # Routes
/// - `POST /users/register` - Register a new customer account
/// - `POST /users/login` - Authenticate and get tokens
/// - `POST /users/refresh` - Refresh the token pair
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(login))
        .routes(routes!(refresh_token))
}

/// POST /api/users/register - Register a new user
///
/// Persists a new customer account with a hashed password.
#[utoipa::path(
    post,
    path = "/users/register",
    tag = AUTH_TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Invalid request data"),
        (status = 409, description = "Username already taken")
    )
)]
async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let user = state
        .services
        .users
        .register(payload.username, payload.password)
        .await?;

    let response = RegisterResponse {
        message: "User registered successfully".to_string(),
        user: user.into(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/users/login - Authenticate user
///
/// Verifies the password hash and returns JWT tokens.
#[utoipa::path(
    post,
    path = "/users/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (user, access_token, refresh_token) = state
        .services
        .users
        .authenticate(
            &payload.username,
            &payload.password,
            &state.jwt_config.secret,
            state.jwt_config.access_token_expiration,
            state.jwt_config.refresh_token_expiration,
        )
        .await?;

    let response = LoginResponse {
        user: user.into(),
        access_token,
        refresh_token,
    };

    Ok(Json(response))
}

/// POST /api/users/refresh - Refresh access token
///
/// Validates the refresh token and issues a new token pair.
#[utoipa::path(
    post,
    path = "/users/refresh",
    tag = AUTH_TAG,
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Tokens refreshed successfully", body = RefreshTokenResponse),
        (status = 401, description = "Invalid or expired refresh token")
    )
)]
async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> AppResult<Json<RefreshTokenResponse>> {
    let claims = validate_refresh_token(&payload.refresh_token, &state.jwt_config.secret)?;

    let user_id: i32 = claims
        .sub
        .parse()
        .map_err(|_| crate::error::AppError::Unauthorized {
            message: "Invalid user ID in token".to_string(),
        })?;

    // The account must still exist before new tokens are minted
    let user = state.services.users.get_user(user_id).await?;

    let (access_token, refresh_token) = generate_token_pair(
        user.id,
        user.username.clone(),
        user.role,
        &state.jwt_config.secret,
        state.jwt_config.access_token_expiration,
        state.jwt_config.refresh_token_expiration,
    )?;

    Ok(Json(RefreshTokenResponse {
        access_token,
        refresh_token,
    }))
}
