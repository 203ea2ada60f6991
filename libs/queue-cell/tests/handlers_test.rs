// libs/queue-cell/tests/handlers_test.rs
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use doctor_cell::router::doctor_routes;
use doctor_cell::InMemoryDoctorDirectory;
use queue_cell::router::queue_routes;
use shared_config::AppConfig;
use shared_store::{AppState, InMemoryAppointmentStore};

fn create_test_app() -> Router {
    let state = Arc::new(AppState::new(
        AppConfig::default(),
        Arc::new(InMemoryAppointmentStore::new()),
        Arc::new(InMemoryDoctorDirectory::new()),
    ));
    Router::new()
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/appointments", queue_routes(state))
}

fn tomorrow() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(1)
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        json!(null)
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn register_doctor(app: &Router, daily_token_limit: i32) -> Uuid {
    let (status, body) = send_json(
        app,
        "POST",
        "/doctors",
        json!({
            "full_name": "Dr. Handler",
            "specialty": "General Medicine",
            "daily_token_limit": daily_token_limit
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["doctor"]["id"].as_str().unwrap().parse().unwrap()
}

async fn book_appointment(app: &Router, doctor_id: Uuid, date: NaiveDate) -> Uuid {
    let (status, body) = send_json(
        app,
        "POST",
        "/appointments",
        json!({
            "patient_id": Uuid::new_v4(),
            "doctor_id": doctor_id,
            "appointment_date": date,
            "shift_id": null
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["appointment"]["id"].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_full_booking_and_queue_flow() {
    let app = create_test_app();
    let date = tomorrow();
    let doctor_id = register_doctor(&app, 5).await;

    let appointment_id = book_appointment(&app, doctor_id, date).await;

    // Confirm payment: token 1 issued.
    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/appointments/{}/confirm-payment", appointment_id),
        json!(null),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appointment"]["token_number"], json!(1));
    assert_eq!(body["appointment"]["status"], json!("booked"));

    // Call next: our appointment gets called.
    let (status, body) = send_json(
        &app,
        "POST",
        "/appointments/call-next",
        json!({
            "doctor_id": doctor_id,
            "date": date,
            "shift_id": null
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["appointment"]["id"],
        json!(appointment_id.to_string())
    );
    assert_eq!(body["appointment"]["status"], json!("called"));

    // Complete the consultation.
    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/appointments/{}/complete", appointment_id),
        json!({
            "actor_id": doctor_id,
            "role": "doctor"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appointment"]["status"], json!("completed"));

    // Queue view reflects the completed consultation.
    let (status, body) = send_get(
        &app,
        &format!("/appointments/queue?doctor_id={}&date={}", doctor_id, date),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["total"], json!(1));
    assert_eq!(body["stats"]["completed"], json!(1));
}

#[tokio::test]
async fn test_confirm_payment_twice_returns_conflict() {
    let app = create_test_app();
    let doctor_id = register_doctor(&app, 5).await;
    let appointment_id = book_appointment(&app, doctor_id, tomorrow()).await;

    let uri = format!("/appointments/{}/confirm-payment", appointment_id);
    let (status, _) = send_json(&app, "POST", &uri, json!(null)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(&app, "POST", &uri, json!(null)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already paid"));
}

#[tokio::test]
async fn test_capacity_exceeded_returns_conflict() {
    let app = create_test_app();
    let date = tomorrow();
    let doctor_id = register_doctor(&app, 1).await;

    let first = book_appointment(&app, doctor_id, date).await;
    let second = book_appointment(&app, doctor_id, date).await;

    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/appointments/{}/confirm-payment", first),
        json!(null),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/appointments/{}/confirm-payment", second),
        json!(null),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_completing_uncalled_appointment_returns_bad_request() {
    let app = create_test_app();
    let doctor_id = register_doctor(&app, 5).await;
    let appointment_id = book_appointment(&app, doctor_id, tomorrow()).await;

    send_json(
        &app,
        "POST",
        &format!("/appointments/{}/confirm-payment", appointment_id),
        json!(null),
    )
    .await;

    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/appointments/{}/complete", appointment_id),
        json!({
            "actor_id": doctor_id,
            "role": "doctor"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_foreign_doctor_action_returns_forbidden() {
    let app = create_test_app();
    let date = tomorrow();
    let doctor_id = register_doctor(&app, 5).await;
    let other_doctor = register_doctor(&app, 5).await;
    let appointment_id = book_appointment(&app, doctor_id, date).await;

    send_json(
        &app,
        "POST",
        &format!("/appointments/{}/confirm-payment", appointment_id),
        json!(null),
    )
    .await;
    send_json(
        &app,
        "POST",
        "/appointments/call-next",
        json!({"doctor_id": doctor_id, "date": date, "shift_id": null}),
    )
    .await;

    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/appointments/{}/skip", appointment_id),
        json!({
            "actor_id": other_doctor,
            "role": "doctor"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_appointment_returns_not_found() {
    let app = create_test_app();
    register_doctor(&app, 5).await;

    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/appointments/{}/confirm-payment", Uuid::new_v4()),
        json!(null),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_get(&app, &format!("/appointments/{}", Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booking_on_leave_day_returns_conflict() {
    let app = create_test_app();
    let date = tomorrow();
    let doctor_id = register_doctor(&app, 5).await;

    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/doctors/{}/leave", doctor_id),
        json!({"date": date}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(
        &app,
        "POST",
        "/appointments",
        json!({
            "patient_id": Uuid::new_v4(),
            "doctor_id": doctor_id,
            "appointment_date": date,
            "shift_id": null
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("leave"));
}

#[tokio::test]
async fn test_call_next_on_empty_queue_returns_null() {
    let app = create_test_app();
    let doctor_id = register_doctor(&app, 5).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/appointments/call-next",
        json!({
            "doctor_id": doctor_id,
            "date": tomorrow(),
            "shift_id": null
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appointment"], json!(null));
}
