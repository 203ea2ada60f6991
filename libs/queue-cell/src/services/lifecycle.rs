// libs/queue-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use shared_models::AppointmentStatus;

use crate::models::QueueError;

/// The queue state machine. Every status write in the cell goes
/// through `validate_transition`; there are no ad hoc guards anywhere
/// else.
pub struct QueueLifecycleService;

impl QueueLifecycleService {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_transition(
        &self,
        current: AppointmentStatus,
        next: AppointmentStatus,
    ) -> Result<(), QueueError> {
        debug!("Validating status transition {} -> {}", current, next);

        if !self.valid_transitions(current).contains(&next) {
            warn!("Invalid status transition attempted: {} -> {}", current, next);
            return Err(QueueError::InvalidTransition {
                from: current,
                to: next,
            });
        }

        Ok(())
    }

    /// All valid next statuses for a given current status.
    pub fn valid_transitions(&self, current: AppointmentStatus) -> Vec<AppointmentStatus> {
        match current {
            AppointmentStatus::Pending => vec![
                AppointmentStatus::Booked,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Booked => vec![
                AppointmentStatus::Called,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Called => vec![
                AppointmentStatus::Completed,
                AppointmentStatus::Skipped,
                // Crash-recovery reversion used by call-next step 1.
                AppointmentStatus::Booked,
            ],
            AppointmentStatus::Skipped => vec![AppointmentStatus::Called],
            // Terminal states
            AppointmentStatus::Completed => vec![],
            AppointmentStatus::Cancelled => vec![],
        }
    }
}

impl Default for QueueLifecycleService {
    fn default() -> Self {
        Self::new()
    }
}
