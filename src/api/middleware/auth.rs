//! JWT authentication middleware.
//!
//! Validates bearer tokens and exposes the caller's identity to handlers.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::UserRole;
use crate::state::AppState;
use crate::utils::jwt::{Claims, validate_access_token};

/// Authenticated caller, extracted from validated JWT claims.
///
/// Added to request extensions after successful authentication; handlers
/// read it with `Extension<AuthUser>`. Booking handlers use `user_id` as
/// the requester identity instead of trusting anything in the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// User ID from JWT claims
    pub user_id: i32,
    /// Username from JWT claims
    pub username: String,
    /// Account role from JWT claims
    pub role: UserRole,
}

impl AuthUser {
    /// Whether the caller holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub.parse().unwrap_or(0),
            username: claims.username,
            role: claims.role,
        }
    }
}

/// JWT authentication middleware.
///
/// Expects `Authorization: Bearer <token>`; rejects missing headers,
/// malformed values, invalid signatures, and expired tokens with 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized {
            message: "Missing authorization header".to_string(),
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized {
            message: "Invalid authorization header format. Expected: Bearer <token>".to_string(),
        })?;

    let claims = validate_access_token(token, &state.jwt_config.secret)?;

    let auth_user = AuthUser::from(claims);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use crate::utils::jwt::TokenType;

    use super::*;

    #[test]
    fn auth_user_from_claims() {
        let claims = Claims {
            sub: "123".to_string(),
            username: "alice".to_string(),
            role: UserRole::Customer,
            token_type: TokenType::Access,
            iat: 0,
            exp: 9999999999,
        };

        let auth_user = AuthUser::from(claims);
        assert_eq!(auth_user.user_id, 123);
        assert_eq!(auth_user.username, "alice");
        assert!(!auth_user.is_admin());
    }

    #[test]
    fn admin_claims_grant_admin() {
        let claims = Claims {
            sub: "1".to_string(),
            username: "root".to_string(),
            role: UserRole::Admin,
            token_type: TokenType::Access,
            iat: 0,
            exp: 9999999999,
        };

        assert!(AuthUser::from(claims).is_admin());
    }

    #[test]
    fn unparsable_subject_falls_back_to_zero() {
        let claims = Claims {
            sub: "not-a-number".to_string(),
            username: "alice".to_string(),
            role: UserRole::Customer,
            token_type: TokenType::Access,
            iat: 0,
            exp: 9999999999,
        };

        assert_eq!(AuthUser::from(claims).user_id, 0);
    }
}
