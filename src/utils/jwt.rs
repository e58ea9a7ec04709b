use jiff::{Timestamp, ToSpan};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::UserRole;

/// Token type enumeration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token for API authentication (short-lived)
    Access,
    /// Refresh token for obtaining new access tokens (long-lived)
    Refresh,
}

/// JWT claims carrying user identity and token metadata.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Username
    pub username: String,
    /// Account role
    pub role: UserRole,
    /// Token type (access or refresh)
    pub token_type: TokenType,
    /// Issued at (unix timestamp)
    pub iat: i64,
    /// Expiration time (unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user expiring `expiration_hours` from now.
    pub fn new(
        user_id: i32,
        username: String,
        role: UserRole,
        token_type: TokenType,
        expiration_hours: i64,
    ) -> Self {
        let now = Timestamp::now();
        let exp = now + expiration_hours.hours();

        Self {
            sub: user_id.to_string(),
            username,
            role,
            token_type,
            iat: now.as_second(),
            exp: exp.as_second(),
        }
    }
}

/// Generates a signed JWT for a user.
pub fn generate_token(
    user_id: i32,
    username: String,
    role: UserRole,
    token_type: TokenType,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(user_id, username, role, token_type, expiration_hours);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Generates an access token (short-lived).
pub fn generate_access_token(
    user_id: i32,
    username: String,
    role: UserRole,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    generate_token(
        user_id,
        username,
        role,
        TokenType::Access,
        secret,
        expiration_hours,
    )
}

/// Generates a refresh token (long-lived).
pub fn generate_refresh_token(
    user_id: i32,
    username: String,
    role: UserRole,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    generate_token(
        user_id,
        username,
        role,
        TokenType::Refresh,
        secret,
        expiration_hours,
    )
}

/// Generates an (access, refresh) token pair for a user.
pub fn generate_token_pair(
    user_id: i32,
    username: String,
    role: UserRole,
    secret: &str,
    access_expiration_hours: i64,
    refresh_expiration_hours: i64,
) -> AppResult<(String, String)> {
    let access_token = generate_access_token(
        user_id,
        username.clone(),
        role,
        secret,
        access_expiration_hours,
    )?;

    let refresh_token =
        generate_refresh_token(user_id, username, role, secret, refresh_expiration_hours)?;

    Ok((access_token, refresh_token))
}

/// Validates a JWT and decodes its claims.
///
/// When `expected_type` is given, a structurally valid token of the wrong
/// type (e.g. an access token where a refresh token is required) is
/// rejected as unauthorized.
pub fn validate_token(
    token: &str,
    secret: &str,
    expected_type: Option<TokenType>,
) -> AppResult<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::Unauthorized {
            message: "Token has expired".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidToken => AppError::Unauthorized {
            message: "Invalid token".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AppError::Unauthorized {
            message: "Invalid token signature".to_string(),
        },
        _ => AppError::Unauthorized {
            message: format!("Token validation failed: {}", e),
        },
    })?;

    if let Some(expected) = expected_type
        && claims.token_type != expected
    {
        return Err(AppError::Unauthorized {
            message: format!(
                "Invalid token type: expected {:?}, got {:?}",
                expected, claims.token_type
            ),
        });
    }

    Ok(claims)
}

/// Validates an access token.
pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Access))
}

/// Validates a refresh token.
pub fn validate_refresh_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Refresh))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test_secret_key_for_jwt_testing";

    #[test]
    fn generates_and_validates_token() {
        let token = generate_token(
            1,
            "alice".to_string(),
            UserRole::Customer,
            TokenType::Access,
            TEST_SECRET,
            24,
        )
        .unwrap();

        assert!(token.contains('.'));

        let claims = validate_token(&token, TEST_SECRET, None).unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, UserRole::Customer);
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn token_pair_differs() {
        let (access_token, refresh_token) = generate_token_pair(
            1,
            "alice".to_string(),
            UserRole::Customer,
            TEST_SECRET,
            1,
            168,
        )
        .unwrap();

        assert!(!access_token.is_empty());
        assert!(!refresh_token.is_empty());
        assert_ne!(access_token, refresh_token);
    }

    #[test]
    fn role_survives_round_trip() {
        let token = generate_access_token(7, "root".to_string(), UserRole::Admin, TEST_SECRET, 1)
            .unwrap();

        let claims = validate_access_token(&token, TEST_SECRET).unwrap();
        assert_eq!(claims.role, UserRole::Admin);
    }

    #[test]
    fn rejects_wrong_token_type() {
        let access_token =
            generate_access_token(1, "alice".to_string(), UserRole::Customer, TEST_SECRET, 1)
                .unwrap();

        let result = validate_refresh_token(&access_token, TEST_SECRET);
        match result {
            Err(AppError::Unauthorized { message }) => {
                assert!(message.contains("Invalid token type"));
            }
            other => panic!("Expected Unauthorized error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = generate_access_token(1, "alice".to_string(), UserRole::Customer, TEST_SECRET, 1)
            .unwrap();

        let result = validate_token(&token, "wrong_secret", None);
        match result {
            Err(AppError::Unauthorized { message }) => {
                assert!(message.contains("signature"));
            }
            other => panic!("Expected Unauthorized error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_garbage_token() {
        assert!(validate_token("invalid.token.format", TEST_SECRET, None).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        // Negative hours creates an already expired token
        let token = generate_token(
            1,
            "alice".to_string(),
            UserRole::Customer,
            TokenType::Access,
            TEST_SECRET,
            -1,
        )
        .unwrap();

        let result = validate_token(&token, TEST_SECRET, None);
        match result {
            Err(AppError::Unauthorized { message }) => {
                assert!(message.contains("expired"));
            }
            other => panic!("Expected Unauthorized error, got {:?}", other),
        }
    }

    #[test]
    fn claims_expiration_follows_issue_time() {
        let claims = Claims::new(
            42,
            "alice".to_string(),
            UserRole::Customer,
            TokenType::Refresh,
            24,
        );

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn token_type_serializes_lowercase() {
        let claims = Claims::new(
            1,
            "alice".to_string(),
            UserRole::Customer,
            TokenType::Access,
            1,
        );
        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("\"token_type\":\"access\""));
        assert!(json.contains("\"role\":\"customer\""));
    }
}
