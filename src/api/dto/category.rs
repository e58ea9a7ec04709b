//! Service catalog DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{NewServiceCategory, ServiceCategory};

/// Request body for creating a new category (admin only).
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    #[schema(example = "Electrician", min_length = 2, max_length = 100)]
    pub name: String,
}

impl CreateCategoryRequest {
    /// Converts the request DTO into a model for database insertion.
    pub fn into_new_category(self) -> NewServiceCategory {
        NewServiceCategory { name: self.name }
    }
}

/// Response body for a category.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Plumber")]
    pub name: String,
}

impl From<ServiceCategory> for CategoryResponse {
    fn from(category: ServiceCategory) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}
