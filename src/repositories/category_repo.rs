//! Service category repository.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewServiceCategory, ServiceCategory};

/// Repository for the service category catalog.
#[derive(Clone)]
pub struct CategoryRepository {
    pool: AsyncDbPool,
}

impl CategoryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Inserts a new category and returns the stored row.
    pub async fn create(
        &self,
        new_category: NewServiceCategory,
    ) -> Result<ServiceCategory, AppError> {
        use crate::schema::service_categories::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(service_categories)
            .values(&new_category)
            .returning(ServiceCategory::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists the whole catalog, ordered by id so seeded order is stable.
    pub async fn list_all(&self) -> Result<Vec<ServiceCategory>, AppError> {
        use crate::schema::service_categories::dsl::*;
        let mut conn = self.pool.get().await?;

        service_categories
            .order(id.asc())
            .select(ServiceCategory::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds a category by id, `None` if absent.
    pub async fn find_by_id(&self, category_id: i32) -> Result<Option<ServiceCategory>, AppError> {
        use crate::schema::service_categories::dsl::*;
        let mut conn = self.pool.get().await?;

        service_categories
            .filter(id.eq(category_id))
            .select(ServiceCategory::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}
