// libs/queue-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::{Appointment, AppointmentStatus, PartitionKey};

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub appointment_date: NaiveDate,
    pub shift_id: Option<Uuid>,
    /// Fee-exempt bookings get their token at booking time instead of
    /// waiting for payment confirmation.
    #[serde(default)]
    pub fee_exempt: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallNextRequest {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub shift_id: Option<Uuid>,
}

impl CallNextRequest {
    pub fn partition(&self) -> PartitionKey {
        PartitionKey::new(self.doctor_id, self.date, self.shift_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueueQuery {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub shift_id: Option<Uuid>,
}

impl QueueQuery {
    pub fn partition(&self) -> PartitionKey {
        PartitionKey::new(self.doctor_id, self.date, self.shift_id)
    }
}

/// Who is driving the queue. Authentication happens upstream; the core
/// still enforces that a doctor only acts on their own appointments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffActionRequest {
    pub actor_id: Uuid,
    pub role: ActorRole,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Doctor,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelAppointmentRequest {
    pub reason: Option<String>,
    pub cancelled_by: CancelledBy,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CancelledBy {
    Patient,
    Doctor,
    System,
}

// ==============================================================================
// QUEUE PROJECTION MODELS
// ==============================================================================

/// Derived view of one partition's queue. Never stored, recomputed on
/// every query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueSnapshot {
    pub queue: Vec<Appointment>,
    pub stats: QueueStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueStats {
    pub total: i32,
    pub pending: i32,
    pub booked: i32,
    pub called: i32,
    pub completed: i32,
    pub skipped: i32,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueueError {
    #[error("Token limit of {limit} reached for this doctor and date")]
    CapacityExceeded { limit: i32 },

    #[error("Appointment is already paid")]
    AlreadyPaid,

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Actor is not allowed to act on this appointment")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Doctor unavailable: {0}")]
    DoctorUnavailable(String),

    #[error("Invalid appointment date: {0}")]
    InvalidDate(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for QueueError {
    fn from(err: anyhow::Error) -> Self {
        QueueError::Storage(err.to_string())
    }
}
