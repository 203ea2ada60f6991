// libs/queue-cell/src/services/booking.rs
use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::{
    Appointment, AppointmentStatus, DoctorDirectory, PartitionKey, PaymentStatus,
};
use shared_store::{AppState, AppointmentStore};

use crate::models::{
    ActorRole, BookAppointmentRequest, CancelAppointmentRequest, QueueError, QueueSnapshot,
    StaffActionRequest,
};
use crate::services::allocator::TokenAllocator;
use crate::services::lifecycle::QueueLifecycleService;
use crate::services::projector::QueueProjector;

/// Coordinates the appointment lifecycle: booking, payment
/// confirmation with token allocation, and the staff-driven queue
/// actions. Owns the write path; nothing else mutates appointment
/// status or token numbers.
pub struct AppointmentBookingService {
    config: AppConfig,
    store: Arc<dyn AppointmentStore>,
    doctors: Arc<dyn DoctorDirectory>,
    allocator: TokenAllocator,
    lifecycle: QueueLifecycleService,
}

impl AppointmentBookingService {
    pub fn new(state: &AppState) -> Self {
        Self::with_collaborators(
            state.config.clone(),
            Arc::clone(&state.appointments),
            Arc::clone(&state.doctors),
        )
    }

    pub fn with_collaborators(
        config: AppConfig,
        store: Arc<dyn AppointmentStore>,
        doctors: Arc<dyn DoctorDirectory>,
    ) -> Self {
        let allocator = TokenAllocator::new(Arc::clone(&store));
        Self {
            config,
            store,
            doctors,
            allocator,
            lifecycle: QueueLifecycleService::new(),
        }
    }

    /// Create a placeholder appointment. No capacity is consumed and no
    /// token is assigned until payment confirmation, except for
    /// fee-exempt bookings which allocate immediately.
    pub async fn book(&self, request: BookAppointmentRequest) -> Result<Appointment, QueueError> {
        info!(
            "Booking appointment for patient {} with doctor {} on {}",
            request.patient_id, request.doctor_id, request.appointment_date
        );

        let today = Utc::now().date_naive();
        if request.appointment_date < today {
            return Err(QueueError::InvalidDate(
                "appointment date cannot be in the past".to_string(),
            ));
        }
        let horizon = today + ChronoDuration::days(self.config.max_advance_booking_days);
        if request.appointment_date > horizon {
            return Err(QueueError::InvalidDate(format!(
                "appointments can be booked at most {} days ahead",
                self.config.max_advance_booking_days
            )));
        }

        let doctor = self
            .doctors
            .get(request.doctor_id)
            .await?
            .ok_or(QueueError::NotFound("Doctor"))?;
        if !doctor.active {
            return Err(QueueError::DoctorUnavailable(
                "doctor is not accepting appointments".to_string(),
            ));
        }
        if doctor.leave_dates.contains(&request.appointment_date) {
            return Err(QueueError::DoctorUnavailable(format!(
                "doctor is on leave on {}",
                request.appointment_date
            )));
        }
        if let Some(shift_id) = request.shift_id {
            doctor.shift(shift_id).ok_or(QueueError::NotFound("Shift"))?;
        }

        let appointment = Appointment::new_pending(
            request.patient_id,
            request.doctor_id,
            request.appointment_date,
            request.shift_id,
        );
        self.store.insert(appointment.clone()).await?;
        info!("Appointment {} created as pending", appointment.id);

        if request.fee_exempt {
            return self.assign_token(appointment.id, true).await;
        }

        Ok(appointment)
    }

    /// Payment confirmed: allocate the next token and move the
    /// appointment to booked, atomically per partition.
    pub async fn confirm_payment(&self, appointment_id: Uuid) -> Result<Appointment, QueueError> {
        self.assign_token(appointment_id, false).await
    }

    async fn assign_token(
        &self,
        appointment_id: Uuid,
        fee_exempt: bool,
    ) -> Result<Appointment, QueueError> {
        let appointment = self
            .store
            .get(appointment_id)
            .await?
            .ok_or(QueueError::NotFound("Appointment"))?;
        let partition = appointment.partition();

        let _guard = self.store.lock_partition(&partition).await;

        // Re-read under the lock; a concurrent confirmation may have won.
        let mut appointment = self
            .store
            .get(appointment_id)
            .await?
            .ok_or(QueueError::NotFound("Appointment"))?;
        if appointment.is_paid() {
            return Err(QueueError::AlreadyPaid);
        }
        self.lifecycle
            .validate_transition(appointment.status, AppointmentStatus::Booked)?;

        let limit = self.partition_limit(&partition).await?;
        let token = self.allocator.allocate(&partition, limit).await?;

        appointment.token_number = Some(token);
        appointment.payment_status = PaymentStatus::Paid;
        appointment.status = AppointmentStatus::Booked;
        appointment.updated_at = Utc::now();
        let saved = self.store.update(appointment).await?;

        info!(
            "Token {} issued for appointment {} in partition {}{}",
            token,
            appointment_id,
            partition,
            if fee_exempt { " (fee exempt)" } else { "" }
        );
        Ok(saved)
    }

    /// Advance the queue: revert any stale called appointment, then
    /// call the lowest-token booked patient, falling back to skipped
    /// ones. `None` means the queue is empty, which is not an error.
    pub async fn call_next(
        &self,
        partition: PartitionKey,
    ) -> Result<Option<Appointment>, QueueError> {
        let _guard = self.store.lock_partition(&partition).await;

        let mut appointments = self.store.list_partition(&partition).await?;

        // A crash between call and complete can leave a called patient
        // behind; revert before selecting so at most one stays called.
        for appointment in appointments
            .iter_mut()
            .filter(|a| a.status == AppointmentStatus::Called)
        {
            warn!(
                "Reverting stale called appointment {} in partition {}",
                appointment.id, partition
            );
            self.lifecycle
                .validate_transition(appointment.status, AppointmentStatus::Booked)?;
            appointment.status = AppointmentStatus::Booked;
            appointment.updated_at = Utc::now();
            self.store.update(appointment.clone()).await?;
        }

        let Some(next) = QueueProjector::next_eligible(&appointments).cloned() else {
            debug!("Queue empty for partition {}", partition);
            return Ok(None);
        };

        self.lifecycle
            .validate_transition(next.status, AppointmentStatus::Called)?;
        let mut next = next;
        next.status = AppointmentStatus::Called;
        next.updated_at = Utc::now();
        let saved = self.store.update(next).await?;

        info!(
            "Called token {:?} (appointment {}) in partition {}",
            saved.token_number, saved.id, partition
        );
        Ok(Some(saved))
    }

    pub async fn mark_completed(
        &self,
        appointment_id: Uuid,
        actor: &StaffActionRequest,
    ) -> Result<Appointment, QueueError> {
        self.finish_serving(appointment_id, actor, AppointmentStatus::Completed)
            .await
    }

    pub async fn mark_skipped(
        &self,
        appointment_id: Uuid,
        actor: &StaffActionRequest,
    ) -> Result<Appointment, QueueError> {
        self.finish_serving(appointment_id, actor, AppointmentStatus::Skipped)
            .await
    }

    async fn finish_serving(
        &self,
        appointment_id: Uuid,
        actor: &StaffActionRequest,
        target: AppointmentStatus,
    ) -> Result<Appointment, QueueError> {
        let appointment = self
            .store
            .get(appointment_id)
            .await?
            .ok_or(QueueError::NotFound("Appointment"))?;
        let partition = appointment.partition();

        let _guard = self.store.lock_partition(&partition).await;

        let mut appointment = self
            .store
            .get(appointment_id)
            .await?
            .ok_or(QueueError::NotFound("Appointment"))?;

        if actor.role == ActorRole::Doctor && actor.actor_id != appointment.doctor_id {
            warn!(
                "Doctor {} attempted to act on appointment {} owned by doctor {}",
                actor.actor_id, appointment_id, appointment.doctor_id
            );
            return Err(QueueError::Forbidden);
        }

        self.lifecycle.validate_transition(appointment.status, target)?;
        appointment.status = target;
        appointment.updated_at = Utc::now();
        let saved = self.store.update(appointment).await?;

        info!("Appointment {} marked {}", appointment_id, target);
        Ok(saved)
    }

    /// Cancel a pending or booked appointment. An issued token is a
    /// commitment to the patient: it is never reassigned or renumbered,
    /// and the capacity slot stays consumed.
    pub async fn cancel(
        &self,
        appointment_id: Uuid,
        request: CancelAppointmentRequest,
    ) -> Result<Appointment, QueueError> {
        let appointment = self
            .store
            .get(appointment_id)
            .await?
            .ok_or(QueueError::NotFound("Appointment"))?;
        let partition = appointment.partition();

        let _guard = self.store.lock_partition(&partition).await;

        let mut appointment = self
            .store
            .get(appointment_id)
            .await?
            .ok_or(QueueError::NotFound("Appointment"))?;

        self.lifecycle
            .validate_transition(appointment.status, AppointmentStatus::Cancelled)?;
        appointment.status = AppointmentStatus::Cancelled;
        appointment.updated_at = Utc::now();
        let saved = self.store.update(appointment).await?;

        info!(
            "Appointment {} cancelled by {:?} ({})",
            appointment_id,
            request.cancelled_by,
            request.reason.as_deref().unwrap_or("no reason given")
        );
        Ok(saved)
    }

    pub async fn get(&self, appointment_id: Uuid) -> Result<Appointment, QueueError> {
        self.store
            .get(appointment_id)
            .await?
            .ok_or(QueueError::NotFound("Appointment"))
    }

    /// Current queue view for a partition, from one consistent
    /// snapshot.
    pub async fn queue(&self, partition: PartitionKey) -> Result<QueueSnapshot, QueueError> {
        let appointments = self.store.list_partition(&partition).await?;
        Ok(QueueProjector::project(appointments))
    }

    async fn partition_limit(&self, partition: &PartitionKey) -> Result<i32, QueueError> {
        let doctor = self
            .doctors
            .get(partition.doctor_id)
            .await?
            .ok_or(QueueError::NotFound("Doctor"))?;
        doctor
            .token_limit_for(partition.shift_id)
            .ok_or(QueueError::NotFound("Shift"))
    }
}
