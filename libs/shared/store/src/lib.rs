pub mod memory;
pub mod state;
pub mod store;

pub use memory::InMemoryAppointmentStore;
pub use state::AppState;
pub use store::AppointmentStore;
