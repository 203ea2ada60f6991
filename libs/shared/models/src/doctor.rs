// libs/shared/models/src/doctor.rs
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub id: Uuid,
    pub full_name: String,
    pub specialty: Option<String>,
    pub active: bool,
    /// Token ceiling for shift-less bookings on any given day.
    pub daily_token_limit: i32,
    pub shifts: Vec<Shift>,
    pub leave_dates: Vec<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    pub id: Uuid,
    pub label: String,
    pub token_limit: i32,
}

impl DoctorProfile {
    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        self.active && !self.leave_dates.contains(&date)
    }

    pub fn shift(&self, shift_id: Uuid) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.id == shift_id)
    }

    /// Token ceiling for a partition under this doctor. `None` when the
    /// shift id does not belong to this doctor.
    pub fn token_limit_for(&self, shift_id: Option<Uuid>) -> Option<i32> {
        match shift_id {
            Some(id) => self.shift(id).map(|s| s.token_limit),
            None => Some(self.daily_token_limit),
        }
    }
}

/// Partial update for a doctor profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoctorUpdate {
    pub full_name: Option<String>,
    pub specialty: Option<String>,
    pub active: Option<bool>,
    pub daily_token_limit: Option<i32>,
}

/// The doctor-availability collaborator consulted before booking and
/// when resolving a partition's token limit. The in-memory registry in
/// doctor-cell implements it; a deployment backed by an external
/// directory swaps the implementation behind this seam.
#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    async fn register(&self, profile: DoctorProfile) -> Result<DoctorProfile>;

    async fn get(&self, doctor_id: Uuid) -> Result<Option<DoctorProfile>>;

    async fn update(&self, doctor_id: Uuid, update: DoctorUpdate) -> Result<Option<DoctorProfile>>;

    async fn add_leave(&self, doctor_id: Uuid, date: NaiveDate) -> Result<Option<DoctorProfile>>;

    async fn add_shift(&self, doctor_id: Uuid, shift: Shift) -> Result<Option<DoctorProfile>>;
}
