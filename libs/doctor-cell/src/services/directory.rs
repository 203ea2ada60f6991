// libs/doctor-cell/src/services/directory.rs
use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use shared_models::{DoctorDirectory, DoctorProfile, DoctorUpdate, Shift};

/// In-process doctor registry backing the `DoctorDirectory` seam.
#[derive(Default)]
pub struct InMemoryDoctorDirectory {
    doctors: RwLock<HashMap<Uuid, DoctorProfile>>,
}

impl InMemoryDoctorDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DoctorDirectory for InMemoryDoctorDirectory {
    async fn register(&self, profile: DoctorProfile) -> Result<DoctorProfile> {
        let mut doctors = self.doctors.write().await;
        info!("Registering doctor {} ({})", profile.full_name, profile.id);
        doctors.insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn get(&self, doctor_id: Uuid) -> Result<Option<DoctorProfile>> {
        let doctors = self.doctors.read().await;
        Ok(doctors.get(&doctor_id).cloned())
    }

    async fn update(&self, doctor_id: Uuid, update: DoctorUpdate) -> Result<Option<DoctorProfile>> {
        let mut doctors = self.doctors.write().await;
        let Some(profile) = doctors.get_mut(&doctor_id) else {
            return Ok(None);
        };

        if let Some(full_name) = update.full_name {
            profile.full_name = full_name;
        }
        if let Some(specialty) = update.specialty {
            profile.specialty = Some(specialty);
        }
        if let Some(active) = update.active {
            profile.active = active;
        }
        if let Some(limit) = update.daily_token_limit {
            profile.daily_token_limit = limit;
        }
        profile.updated_at = Utc::now();

        debug!("Updated doctor {}", doctor_id);
        Ok(Some(profile.clone()))
    }

    async fn add_leave(&self, doctor_id: Uuid, date: NaiveDate) -> Result<Option<DoctorProfile>> {
        let mut doctors = self.doctors.write().await;
        let Some(profile) = doctors.get_mut(&doctor_id) else {
            return Ok(None);
        };

        if !profile.leave_dates.contains(&date) {
            profile.leave_dates.push(date);
            profile.leave_dates.sort();
        }
        profile.updated_at = Utc::now();

        debug!("Added leave {} for doctor {}", date, doctor_id);
        Ok(Some(profile.clone()))
    }

    async fn add_shift(&self, doctor_id: Uuid, shift: Shift) -> Result<Option<DoctorProfile>> {
        let mut doctors = self.doctors.write().await;
        let Some(profile) = doctors.get_mut(&doctor_id) else {
            return Ok(None);
        };

        debug!("Adding shift {} for doctor {}", shift.label, doctor_id);
        profile.shifts.push(shift);
        profile.updated_at = Utc::now();
        Ok(Some(profile.clone()))
    }
}
