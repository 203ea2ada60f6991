pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{
    ActorRole, BookAppointmentRequest, CallNextRequest, CancelAppointmentRequest, CancelledBy,
    QueueError, QueueQuery, QueueSnapshot, QueueStats, StaffActionRequest,
};
pub use services::booking::AppointmentBookingService;
