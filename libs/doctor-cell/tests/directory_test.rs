// libs/doctor-cell/tests/directory_test.rs
use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use doctor_cell::InMemoryDoctorDirectory;
use shared_models::{DoctorDirectory, DoctorProfile, DoctorUpdate, Shift};

fn tomorrow() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(1)
}

fn profile() -> DoctorProfile {
    let now = Utc::now();
    DoctorProfile {
        id: Uuid::new_v4(),
        full_name: "Dr. Registry".to_string(),
        specialty: Some("Cardiology".to_string()),
        active: true,
        daily_token_limit: 20,
        shifts: Vec::new(),
        leave_dates: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_register_and_get() {
    let directory = InMemoryDoctorDirectory::new();

    let doctor = directory.register(profile()).await.unwrap();
    let found = directory.get(doctor.id).await.unwrap().unwrap();
    assert_eq!(found.full_name, "Dr. Registry");
    assert_eq!(found.daily_token_limit, 20);

    assert!(directory.get(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_partial_update() {
    let directory = InMemoryDoctorDirectory::new();
    let doctor = directory.register(profile()).await.unwrap();

    let updated = directory
        .update(
            doctor.id,
            DoctorUpdate {
                daily_token_limit: Some(5),
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    // Touched fields change, the rest stay put.
    assert_eq!(updated.daily_token_limit, 5);
    assert!(!updated.active);
    assert_eq!(updated.full_name, doctor.full_name);
    assert_eq!(updated.specialty, doctor.specialty);
}

#[tokio::test]
async fn test_update_unknown_doctor_returns_none() {
    let directory = InMemoryDoctorDirectory::new();
    let result = directory
        .update(Uuid::new_v4(), DoctorUpdate::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_leave_dates_are_deduplicated_and_affect_availability() {
    let directory = InMemoryDoctorDirectory::new();
    let doctor = directory.register(profile()).await.unwrap();
    let date = tomorrow();

    directory.add_leave(doctor.id, date).await.unwrap();
    let updated = directory
        .add_leave(doctor.id, date)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.leave_dates, vec![date]);

    assert!(!updated.is_available_on(date));
    assert!(updated.is_available_on(date + Duration::days(1)));
}

#[tokio::test]
async fn test_inactive_doctor_is_unavailable() {
    let directory = InMemoryDoctorDirectory::new();
    let doctor = directory.register(profile()).await.unwrap();

    let updated = directory
        .update(
            doctor.id,
            DoctorUpdate {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert!(!updated.is_available_on(tomorrow()));
}

#[tokio::test]
async fn test_shift_token_limit_resolution() {
    let directory = InMemoryDoctorDirectory::new();
    let doctor = directory.register(profile()).await.unwrap();
    let shift = Shift {
        id: Uuid::new_v4(),
        label: "morning".to_string(),
        token_limit: 8,
    };

    let updated = directory
        .add_shift(doctor.id, shift.clone())
        .await
        .unwrap()
        .unwrap();

    // No shift: daily ceiling. Known shift: its own ceiling. Unknown
    // shift: no ceiling at all.
    assert_eq!(updated.token_limit_for(None), Some(20));
    assert_eq!(updated.token_limit_for(Some(shift.id)), Some(8));
    assert_eq!(updated.token_limit_for(Some(Uuid::new_v4())), None);
}
