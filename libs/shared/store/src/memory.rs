// libs/shared/store/src/memory.rs
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::debug;
use uuid::Uuid;

use shared_models::{Appointment, PartitionKey};

use crate::store::AppointmentStore;

/// Single-instance, in-process store. Records live under one RwLock so
/// every read method returns a consistent snapshot; partition mutexes
/// are created on demand and never removed, so two callers locking the
/// same partition always contend on the same mutex.
#[derive(Default)]
pub struct InMemoryAppointmentStore {
    records: RwLock<HashMap<Uuid, Appointment>>,
    partition_locks: StdMutex<HashMap<PartitionKey, Arc<Mutex<()>>>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn partition_mutex(&self, partition: &PartitionKey) -> Arc<Mutex<()>> {
        let mut locks = self
            .partition_locks
            .lock()
            .expect("partition lock map poisoned");
        locks
            .entry(partition.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn insert(&self, appointment: Appointment) -> Result<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&appointment.id) {
            return Err(anyhow!("appointment {} already exists", appointment.id));
        }
        debug!("Inserting appointment {}", appointment.id);
        records.insert(appointment.id, appointment);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Appointment>> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn update(&self, appointment: Appointment) -> Result<Appointment> {
        let mut records = self.records.write().await;
        if !records.contains_key(&appointment.id) {
            return Err(anyhow!("appointment {} does not exist", appointment.id));
        }
        debug!("Updating appointment {}", appointment.id);
        records.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn list_partition(&self, partition: &PartitionKey) -> Result<Vec<Appointment>> {
        let records = self.records.read().await;
        let mut out: Vec<Appointment> = records
            .values()
            .filter(|a| a.partition() == *partition)
            .cloned()
            .collect();
        // Stable order for callers that iterate: creation order.
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(out)
    }

    async fn lock_partition(&self, partition: &PartitionKey) -> OwnedMutexGuard<()> {
        let mutex = self.partition_mutex(partition);
        mutex.lock_owned().await
    }
}
