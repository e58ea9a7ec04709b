//! Service request (booking) repository.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewServiceRequest, ServiceRequest};

/// Repository for customer bookings.
#[derive(Clone)]
pub struct ServiceRequestRepository {
    pool: AsyncDbPool,
}

impl ServiceRequestRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Inserts a new booking and returns the stored row.
    ///
    /// `requested_at` and `completed` come from column defaults. A
    /// nonexistent category or user id trips the FK constraint, which the
    /// error converter surfaces as a field-level validation error; no row
    /// is created in that case.
    pub async fn create(
        &self,
        new_request: NewServiceRequest,
    ) -> Result<ServiceRequest, AppError> {
        use crate::schema::service_requests::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(service_requests)
            .values(&new_request)
            .returning(ServiceRequest::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds a booking by id, `None` if absent.
    pub async fn find_by_id(&self, request_id: i32) -> Result<Option<ServiceRequest>, AppError> {
        use crate::schema::service_requests::dsl::*;
        let mut conn = self.pool.get().await?;

        service_requests
            .filter(id.eq(request_id))
            .select(ServiceRequest::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists all bookings made by one user, newest first.
    pub async fn list_for_user(&self, requester_id: i32) -> Result<Vec<ServiceRequest>, AppError> {
        use crate::schema::service_requests::dsl::*;
        let mut conn = self.pool.get().await?;

        service_requests
            .filter(user_id.eq(requester_id))
            .order(requested_at.desc())
            .select(ServiceRequest::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Flips the completion flag on a booking and returns the updated row.
    pub async fn mark_completed(&self, request_id: i32) -> Result<ServiceRequest, AppError> {
        use crate::schema::service_requests::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(service_requests.filter(id.eq(request_id)))
            .set(completed.eq(true))
            .returning(ServiceRequest::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
