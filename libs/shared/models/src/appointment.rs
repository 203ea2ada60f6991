// libs/shared/models/src/appointment.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Scope within which token numbers and capacity are independent of
/// every other scope: one doctor, one day, optionally one shift.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartitionKey {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub shift_id: Option<Uuid>,
}

impl PartitionKey {
    pub fn new(doctor_id: Uuid, date: NaiveDate, shift_id: Option<Uuid>) -> Self {
        Self {
            doctor_id,
            date,
            shift_id,
        }
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shift_id {
            Some(shift) => write!(f, "{}/{}/{}", self.doctor_id, self.date, shift),
            None => write!(f, "{}/{}", self.doctor_id, self.date),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub appointment_date: NaiveDate,
    pub shift_id: Option<Uuid>,
    /// Assigned on payment confirmation, starting at 1 per partition.
    /// Immutable once set.
    pub token_number: Option<i32>,
    pub status: AppointmentStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new_pending(
        patient_id: Uuid,
        doctor_id: Uuid,
        appointment_date: NaiveDate,
        shift_id: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            patient_id,
            doctor_id,
            appointment_date,
            shift_id,
            token_number: None,
            status: AppointmentStatus::Pending,
            payment_status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn partition(&self) -> PartitionKey {
        PartitionKey::new(self.doctor_id, self.appointment_date, self.shift_id)
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Booked,
    Called,
    Completed,
    Skipped,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Booked => write!(f, "booked"),
            AppointmentStatus::Called => write!(f, "called"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Skipped => write!(f, "skipped"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Paid => write!(f, "paid"),
            PaymentStatus::Failed => write!(f, "failed"),
            PaymentStatus::Refunded => write!(f, "refunded"),
        }
    }
}
