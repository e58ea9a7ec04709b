mod category;
mod service_request;
mod user;

pub use category::{NewServiceCategory, ServiceCategory};
pub use service_request::{NewServiceRequest, ServiceRequest};
pub use user::{NewUser, User, UserRole};
