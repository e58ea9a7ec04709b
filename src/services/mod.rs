//! Service layer for business logic operations.
//!
//! Only users get a service: registration and login carry real rules
//! (hashing, credential verification, token minting). Category and booking
//! handlers talk to their repositories directly since no business logic
//! sits between them.

mod user_service;

pub use user_service::UserService;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since the underlying pool uses `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: &Repositories) -> Self {
        Self {
            users: UserService::new(repos.users.clone()),
        }
    }
}
