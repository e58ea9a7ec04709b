//! User service: registration and credential verification.

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User, UserRole};
use crate::repositories::UserRepository;
use crate::utils::jwt::generate_token_pair;
use crate::utils::password::{hash_password, verify_password};

/// Business logic around user accounts.
///
/// Wraps the `UserRepository`; cloning is cheap since the repository's
/// connection pool uses `Arc` internally.
#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Registers a new customer account.
    ///
    /// The plain-text password is hashed with Argon2id before it reaches
    /// the database. Every account registered through the public API gets
    /// the `customer` role; admins are provisioned operationally.
    ///
    /// # Errors
    /// `AppError::Duplicate` if the username is already taken.
    pub async fn register(&self, username: String, password: String) -> AppResult<User> {
        let password = hash_password(&password)?;

        self.repo
            .create(NewUser {
                username,
                password,
                role: UserRole::Customer,
            })
            .await
    }

    /// Verifies credentials and mints an (access, refresh) token pair.
    ///
    /// Unknown usernames and wrong passwords produce the same error
    /// message, so responses do not reveal which accounts exist.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
        secret: &str,
        access_expiration_hours: i64,
        refresh_expiration_hours: i64,
    ) -> AppResult<(User, String, String)> {
        let invalid_credentials = || AppError::Unauthorized {
            message: "Invalid username or password".to_string(),
        };

        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(password, &user.password)? {
            return Err(invalid_credentials());
        }

        let (access_token, refresh_token) = generate_token_pair(
            user.id,
            user.username.clone(),
            user.role,
            secret,
            access_expiration_hours,
            refresh_expiration_hours,
        )?;

        Ok((user, access_token, refresh_token))
    }

    /// Gets a user by id, `NotFound` if absent.
    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound {
            entity: "user".to_string(),
            field: "id".to_string(),
            value: id.to_string(),
        })
    }
}
