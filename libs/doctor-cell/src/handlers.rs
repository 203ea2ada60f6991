// libs/doctor-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_models::{DoctorProfile, DoctorUpdate, Shift};
use shared_store::AppState;

use crate::models::{AddLeaveRequest, CreateShiftRequest, RegisterDoctorRequest};

#[axum::debug_handler]
pub async fn register_doctor(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let daily_token_limit = request
        .daily_token_limit
        .unwrap_or(state.config.default_daily_token_limit);
    if daily_token_limit <= 0 {
        return Err(AppError::BadRequest(
            "daily_token_limit must be positive".to_string(),
        ));
    }

    let now = Utc::now();
    let profile = DoctorProfile {
        id: Uuid::new_v4(),
        full_name: request.full_name,
        specialty: request.specialty,
        active: true,
        daily_token_limit,
        shifts: Vec::new(),
        leave_dates: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    let doctor = state
        .doctors
        .register(profile)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "doctor": doctor
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let doctor = state
        .doctors
        .get(doctor_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn update_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<Uuid>,
    Json(update): Json<DoctorUpdate>,
) -> Result<Json<Value>, AppError> {
    if let Some(limit) = update.daily_token_limit {
        if limit <= 0 {
            return Err(AppError::BadRequest(
                "daily_token_limit must be positive".to_string(),
            ));
        }
    }

    let doctor = state
        .doctors
        .update(doctor_id, update)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "doctor": doctor
    })))
}

#[axum::debug_handler]
pub async fn add_leave(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<Uuid>,
    Json(request): Json<AddLeaveRequest>,
) -> Result<Json<Value>, AppError> {
    let doctor = state
        .doctors
        .add_leave(doctor_id, request.date)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "doctor": doctor
    })))
}

#[axum::debug_handler]
pub async fn create_shift(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<Uuid>,
    Json(request): Json<CreateShiftRequest>,
) -> Result<Json<Value>, AppError> {
    if request.token_limit <= 0 {
        return Err(AppError::BadRequest(
            "token_limit must be positive".to_string(),
        ));
    }

    let shift = Shift {
        id: Uuid::new_v4(),
        label: request.label,
        token_limit: request.token_limit,
    };

    let doctor = state
        .doctors
        .add_shift(doctor_id, shift)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "doctor": doctor
    })))
}
