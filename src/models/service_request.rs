//! Service request (booking) models.

use diesel::prelude::*;
use jiff::civil::DateTime;

/// ServiceRequest model for reading from the database.
///
/// Every request references exactly one category and the user who booked
/// it. `requested_at` and `completed` are filled by database defaults at
/// insert time.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::service_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ServiceRequest {
    pub id: i32,
    pub description: String,
    #[diesel(deserialize_as = jiff_diesel::DateTime)]
    pub requested_at: DateTime,
    pub completed: bool,
    pub category_id: i32,
    pub user_id: i32,
}

/// NewServiceRequest model for inserting new records.
///
/// `user_id` comes from the authenticated session, not from the request
/// body.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::service_requests)]
pub struct NewServiceRequest {
    pub description: String,
    pub category_id: i32,
    pub user_id: i32,
}
