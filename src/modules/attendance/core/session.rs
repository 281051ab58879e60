// State of the current attendance upload.
//
// Purpose
// - Hold the published table, a generation counter and the "already processed" guard.
//
// Responsibilities
// - A new upload or a clear bumps the generation, drops the table and resets the guard.
// - Work started under an older generation can never publish into a newer one.
// - The guard is claimed at most once per generation and only released by a failed batch start.

use crate::modules::attendance::core::record::AttendanceTable;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct SessionState {
    generation: u64,
    table: Option<Arc<AttendanceTable>>,
    processed: bool,
}

#[derive(Debug, Default)]
pub struct UploadSession {
    inner: RwLock<SessionState>,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new upload and returns its generation.
    pub async fn begin_upload(&self) -> u64 {
        self.reset().await
    }

    pub async fn clear(&self) {
        self.reset().await;
    }

    async fn reset(&self) -> u64 {
        let mut state = self.inner.write().await;
        state.generation += 1;
        state.table = None;
        state.processed = false;
        state.generation
    }

    pub async fn is_current(&self, generation: u64) -> bool {
        self.inner.read().await.generation == generation
    }

    /// Installs the table if `generation` is still current. Returns false for stale work.
    pub async fn publish(&self, generation: u64, table: AttendanceTable) -> bool {
        let mut state = self.inner.write().await;
        if state.generation != generation {
            return false;
        }
        state.table = Some(Arc::new(table));
        true
    }

    pub async fn current(&self) -> Option<(u64, Arc<AttendanceTable>)> {
        let state = self.inner.read().await;
        state
            .table
            .as_ref()
            .map(|table| (state.generation, Arc::clone(table)))
    }

    /// Sets the "already processed" guard for `generation`. Returns false if it was already set
    /// or the generation is stale.
    pub async fn try_claim(&self, generation: u64) -> bool {
        let mut state = self.inner.write().await;
        if state.generation != generation || state.table.is_none() || state.processed {
            return false;
        }
        state.processed = true;
        true
    }

    pub async fn release(&self, generation: u64) {
        let mut state = self.inner.write().await;
        if state.generation == generation {
            state.processed = false;
        }
    }
}
