// libs/queue-cell/src/services/allocator.rs
use std::sync::Arc;

use tracing::debug;

use shared_models::PartitionKey;
use shared_store::AppointmentStore;

use crate::models::QueueError;
use crate::services::capacity::CapacityPolicy;

/// Issues the next sequential token number for a partition.
///
/// Counting paid appointments and writing the new token must happen
/// under the same partition lock; the caller holds the guard, this
/// service only computes the number. Unpaid bookings do not reserve a
/// slot, so the count is over paid appointments only.
pub struct TokenAllocator {
    store: Arc<dyn AppointmentStore>,
}

impl TokenAllocator {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    pub async fn allocate(&self, partition: &PartitionKey, limit: i32) -> Result<i32, QueueError> {
        let appointments = self.store.list_partition(partition).await?;
        let current_paid = appointments.iter().filter(|a| a.is_paid()).count() as i32;

        CapacityPolicy::can_issue(current_paid, limit)?;

        let token = current_paid + 1;
        debug!(
            "Allocating token {} of {} for partition {}",
            token, limit, partition
        );
        Ok(token)
    }
}
