pub mod appointment;
pub mod doctor;
pub mod error;

pub use appointment::{Appointment, AppointmentStatus, PartitionKey, PaymentStatus};
pub use doctor::{DoctorDirectory, DoctorProfile, DoctorUpdate, Shift};
pub use error::AppError;
