pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{AddLeaveRequest, CreateShiftRequest, RegisterDoctorRequest};
pub use services::directory::InMemoryDoctorDirectory;
