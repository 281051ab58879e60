// Port to the store that owns participation records.
//
// Purpose
// - The attendance engine reads pending participations and requests status transitions through this
//   trait. It never persists anything itself.
//
// Testing guidance
// - Use the in memory store. Toggle it offline or make single ids fail to exercise partial failure.

pub mod in_memory;
pub mod retrying;

use crate::modules::attendance::core::participation::{
    ParticipationRecord, ParticipationStatus, Verdict,
};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParticipationStoreError {
    #[error("participation {0} not found")]
    NotFound(String),

    #[error("participation {id} is {status:?}, not pending")]
    NotPending {
        id: String,
        status: ParticipationStatus,
    },

    #[error("participation store timed out after {0} ms")]
    Timeout(u64),

    #[error("backend error: {0}")]
    Backend(String),
}

impl ParticipationStoreError {
    /// Timeouts and backend failures may succeed on another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ParticipationStoreError::Timeout(_) | ParticipationStoreError::Backend(_)
        )
    }
}

#[async_trait]
pub trait ParticipationStore: Send + Sync {
    async fn list_pending(&self) -> Result<Vec<ParticipationRecord>, ParticipationStoreError>;
    async fn set_status(
        &self,
        participation_id: &str,
        verdict: Verdict,
    ) -> Result<(), ParticipationStoreError>;
}
