// libs/queue-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::AppState;

use crate::models::{
    BookAppointmentRequest, CallNextRequest, CancelAppointmentRequest, QueueError, QueueQuery,
    StaffActionRequest,
};
use crate::services::booking::AppointmentBookingService;

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service.book(request).await.map_err(|e| match e {
        QueueError::NotFound(what) => AppError::NotFound(format!("{} not found", what)),
        QueueError::DoctorUnavailable(_) => AppError::Conflict(e.to_string()),
        QueueError::InvalidDate(_) => AppError::BadRequest(e.to_string()),
        QueueError::CapacityExceeded { .. } => AppError::Conflict(e.to_string()),
        _ => AppError::Internal(e.to_string()),
    })?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment booked successfully"
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service
        .get(appointment_id)
        .await
        .map_err(|e| match e {
            QueueError::NotFound(_) => AppError::NotFound("Appointment not found".to_string()),
            _ => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn confirm_payment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service
        .confirm_payment(appointment_id)
        .await
        .map_err(|e| match e {
            QueueError::NotFound(what) => AppError::NotFound(format!("{} not found", what)),
            QueueError::CapacityExceeded { .. } => AppError::Conflict(e.to_string()),
            QueueError::AlreadyPaid => AppError::Conflict(e.to_string()),
            QueueError::InvalidTransition { .. } => AppError::BadRequest(e.to_string()),
            _ => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Payment confirmed, token issued"
    })))
}

#[axum::debug_handler]
pub async fn call_next(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CallNextRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let called = booking_service
        .call_next(request.partition())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    match called {
        Some(appointment) => Ok(Json(json!({
            "success": true,
            "appointment": appointment,
            "message": "Patient called"
        }))),
        None => Ok(Json(json!({
            "success": true,
            "appointment": null,
            "message": "Queue is empty"
        }))),
    }
}

#[axum::debug_handler]
pub async fn complete_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
    Json(actor): Json<StaffActionRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service
        .mark_completed(appointment_id, &actor)
        .await
        .map_err(map_staff_action_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Consultation completed"
    })))
}

#[axum::debug_handler]
pub async fn skip_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
    Json(actor): Json<StaffActionRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service
        .mark_skipped(appointment_id, &actor)
        .await
        .map_err(map_staff_action_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Patient skipped, can be re-called later"
    })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<CancelAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service
        .cancel(appointment_id, request)
        .await
        .map_err(|e| match e {
            QueueError::NotFound(_) => AppError::NotFound("Appointment not found".to_string()),
            QueueError::InvalidTransition { .. } => AppError::BadRequest(e.to_string()),
            _ => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment cancelled"
    })))
}

#[axum::debug_handler]
pub async fn get_queue(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QueueQuery>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let snapshot = booking_service
        .queue(query.partition())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(snapshot)))
}

fn map_staff_action_error(e: QueueError) -> AppError {
    match e {
        QueueError::NotFound(_) => AppError::NotFound("Appointment not found".to_string()),
        QueueError::Forbidden => {
            AppError::Forbidden("Not authorized to act on this appointment".to_string())
        }
        QueueError::InvalidTransition { .. } => AppError::BadRequest(e.to_string()),
        _ => AppError::Internal(e.to_string()),
    }
}
