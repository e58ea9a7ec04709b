//! Service category models.
//!
//! A category is a named grouping of bookable service types, e.g.
//! "Electrician" or "Plumber".

use diesel::prelude::*;
use serde::Deserialize;

/// ServiceCategory model for reading from the database.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::service_categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ServiceCategory {
    pub id: i32,
    pub name: String,
}

/// NewServiceCategory model for inserting new records.
#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::service_categories)]
pub struct NewServiceCategory {
    pub name: String,
}
