// libs/queue-cell/src/services/capacity.rs
use crate::models::QueueError;

/// Capacity gate for token issuance. Pure; callers must evaluate it
/// inside the same partition-locked section as the allocation itself,
/// otherwise check and allocation can race.
pub struct CapacityPolicy;

impl CapacityPolicy {
    pub fn can_issue(current_paid: i32, limit: i32) -> Result<(), QueueError> {
        if current_paid < limit {
            Ok(())
        } else {
            Err(QueueError::CapacityExceeded { limit })
        }
    }
}
