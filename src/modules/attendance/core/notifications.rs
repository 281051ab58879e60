// Events the engine pushes to the operator's screen.
//
// Ingestion emits progress and a terminal completed/failed event.
// Auto-processing emits one event per participation and one batch summary.

use crate::modules::attendance::core::matcher::Match;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    Approved { matched: Match },
    Rejected { matched: Match },
    Failed { matched: Match, error: String },
    Unresolved,
    NotPending,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub approved: usize,
    pub rejected: usize,
    pub failed: usize,
    pub unresolved: usize,
    pub not_pending: usize,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Approved { .. } => self.approved += 1,
            Outcome::Rejected { .. } => self.rejected += 1,
            Outcome::Failed { .. } => self.failed += 1,
            Outcome::Unresolved => self.unresolved += 1,
            Outcome::NotPending => self.not_pending += 1,
        }
    }

    pub fn succeeded(&self) -> usize {
        self.approved + self.rejected
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttendanceNotification {
    IngestProgress {
        percent: u8,
    },
    IngestCompleted {
        record_count: usize,
        skipped_rows: usize,
    },
    IngestFailed {
        reason: String,
    },
    AttendanceCleared,
    ParticipationDecided {
        participation_id: String,
        outcome: Outcome,
    },
    BatchCompleted {
        batch_id: String,
        summary: BatchSummary,
    },
}
