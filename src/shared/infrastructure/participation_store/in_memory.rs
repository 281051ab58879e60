// In memory implementation of the ParticipationStore port.
//
// Purpose
// - Support handler tests and local development without the portal database.
//
// Responsibilities
// - Keep participations in insertion order and only move pending ones.
// - Record every set_status call so tests can count transitions.
// - Simulate outages, per-id failures, transient failures and slow calls.

use crate::modules::attendance::core::participation::{
    ParticipationRecord, ParticipationStatus, Verdict,
};
use crate::shared::infrastructure::participation_store::{
    ParticipationStore, ParticipationStoreError,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

#[derive(Default)]
pub struct InMemoryParticipationStore {
    records: RwLock<Vec<ParticipationRecord>>,
    calls: Mutex<Vec<(String, Verdict)>>,
    failing_ids: HashSet<String>,
    transient_failures: AtomicU32,
    delay_set_status_ms: AtomicU64,
    is_offline: bool,
}

impl InMemoryParticipationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ParticipationRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Self::default()
        }
    }

    /// Seeds the store from a JSON array of participation records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::with_records(serde_json::from_str(json)?))
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Every set_status call for this id fails with a backend error.
    pub fn fail_for(&mut self, participation_id: impl Into<String>) {
        self.failing_ids.insert(participation_id.into());
    }

    /// The next `count` set_status calls fail with a backend error.
    pub fn fail_next(&self, count: u32) {
        self.transient_failures.store(count, Ordering::SeqCst);
    }

    pub fn set_delay_set_status_ms(&self, delay_ms: u64) {
        self.delay_set_status_ms.store(delay_ms, Ordering::SeqCst);
    }

    pub async fn insert(&self, record: ParticipationRecord) {
        self.records.write().await.push(record);
    }

    pub async fn get(&self, participation_id: &str) -> Option<ParticipationRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id == participation_id)
            .cloned()
    }

    pub async fn status_of(&self, participation_id: &str) -> Option<ParticipationStatus> {
        self.get(participation_id).await.map(|record| record.status)
    }

    pub async fn calls(&self) -> Vec<(String, Verdict)> {
        self.calls.lock().await.clone()
    }

    fn take_transient_failure(&self) -> bool {
        self.transient_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok()
    }
}

#[async_trait::async_trait]
impl ParticipationStore for InMemoryParticipationStore {
    async fn list_pending(&self) -> Result<Vec<ParticipationRecord>, ParticipationStoreError> {
        if self.is_offline {
            return Err(ParticipationStoreError::Backend(
                "Participation store offline".into(),
            ));
        }
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|record| record.is_pending())
            .cloned()
            .collect())
    }

    async fn set_status(
        &self,
        participation_id: &str,
        verdict: Verdict,
    ) -> Result<(), ParticipationStoreError> {
        self.calls
            .lock()
            .await
            .push((participation_id.to_string(), verdict));

        if self.is_offline {
            return Err(ParticipationStoreError::Backend(
                "Participation store offline".into(),
            ));
        }
        if self.failing_ids.contains(participation_id) || self.take_transient_failure() {
            return Err(ParticipationStoreError::Backend(format!(
                "update of {participation_id} failed"
            )));
        }

        let delay_ms = self.delay_set_status_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        let mut guard = self.records.write().await;
        let record = guard
            .iter_mut()
            .find(|record| record.id == participation_id)
            .ok_or_else(|| ParticipationStoreError::NotFound(participation_id.to_string()))?;
        if !record.is_pending() {
            return Err(ParticipationStoreError::NotPending {
                id: record.id.clone(),
                status: record.status,
            });
        }
        record.status = verdict.target_status();
        Ok(())
    }
}
