// libs/shared/store/src/state.rs
use std::sync::Arc;

use shared_config::AppConfig;
use shared_models::DoctorDirectory;

use crate::store::AppointmentStore;

/// Shared application state handed to every cell router.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub appointments: Arc<dyn AppointmentStore>,
    pub doctors: Arc<dyn DoctorDirectory>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        appointments: Arc<dyn AppointmentStore>,
        doctors: Arc<dyn DoctorDirectory>,
    ) -> Self {
        Self {
            config,
            appointments,
            doctors,
        }
    }
}
