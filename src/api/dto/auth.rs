//! Authentication-related Data Transfer Objects

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{User, UserRole};

/// Register request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    /// Username (unique, used as login key)
    #[validate(length(min = 3, max = 20, message = "Username must be between 3 and 20 characters"))]
    #[schema(example = "alice", min_length = 3, max_length = 20)]
    pub username: String,
    /// Password (plain text, will be hashed)
    #[validate(length(min = 6, max = 72, message = "Password must be between 6 and 72 characters"))]
    #[schema(example = "hunter22", format = "password", min_length = 6, max_length = 72)]
    pub password: String,
}

/// Login request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    /// Username
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    #[schema(example = "alice")]
    pub username: String,
    /// Password (plain text)
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    #[schema(example = "hunter22", format = "password")]
    pub password: String,
}

/// Refresh token request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RefreshTokenRequest {
    /// Refresh token
    #[validate(length(min = 1, message = "Refresh token cannot be empty"))]
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub refresh_token: String,
}

/// Register response with the fixed success message and the stored account
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    /// Success message
    #[schema(example = "User registered successfully")]
    pub message: String,
    /// The registered user
    pub user: UserInfo,
}

/// Login response with user info and tokens
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// User information
    pub user: UserInfo,
    /// Access token (short-lived)
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub access_token: String,
    /// Refresh token (long-lived)
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub refresh_token: String,
}

/// Refresh token response with new tokens
#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshTokenResponse {
    /// New access token (short-lived)
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub access_token: String,
    /// New refresh token (long-lived)
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub refresh_token: String,
}

/// User information in responses (never includes the password hash)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserInfo {
    /// User ID
    #[schema(example = 1)]
    pub id: i32,
    /// Username
    #[schema(example = "alice")]
    pub username: String,
    /// Account role
    pub role: UserRole,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}
