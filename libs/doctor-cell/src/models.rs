// libs/doctor-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDoctorRequest {
    pub full_name: String,
    pub specialty: Option<String>,
    /// Falls back to the configured default when omitted.
    pub daily_token_limit: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddLeaveRequest {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShiftRequest {
    pub label: String,
    pub token_limit: i32,
}
