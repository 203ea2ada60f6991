// libs/shared/store/src/store.rs
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

use shared_models::{Appointment, PartitionKey};

/// Persistence collaborator for appointment records.
///
/// Mutating callers are expected to hold the guard returned by
/// `lock_partition` for the whole read-decide-write span; the store
/// itself only guarantees that individual calls observe a consistent
/// snapshot, never that two calls compose atomically.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn insert(&self, appointment: Appointment) -> Result<()>;

    async fn get(&self, id: Uuid) -> Result<Option<Appointment>>;

    /// Replace the stored record with the same id. Errors if the
    /// record does not exist.
    async fn update(&self, appointment: Appointment) -> Result<Appointment>;

    /// All appointments of one partition, read in a single consistent
    /// snapshot.
    async fn list_partition(&self, partition: &PartitionKey) -> Result<Vec<Appointment>>;

    /// Exclusive ownership of a partition for a read-count-then-write
    /// sequence. Guards for distinct partitions are independent.
    async fn lock_partition(&self, partition: &PartitionKey) -> OwnedMutexGuard<()>;
}
