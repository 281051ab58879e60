// Auto-process command handler: settles every pending participation against the uploaded sheet.
//
// Responsibilities
// - Claim the session's "already processed" guard, once per uploaded file.
// - Run the claimed batch in its own task so a dropped request cannot abandon it halfway.
// - Decide every pending participation, then dispatch all transitions concurrently.
// - Wait for every call to settle. A failed call is recorded and never aborts the batch.
// - Notify one outcome per participation, re-fetch pending state once, notify the batch summary.

use crate::modules::attendance::core::matcher::Match;
use crate::modules::attendance::core::notifications::{
    AttendanceNotification, BatchSummary, Outcome,
};
use crate::modules::attendance::core::participation::{ParticipationRecord, Verdict};
use crate::modules::attendance::core::policy::DecisionPolicy;
use crate::modules::attendance::core::record::AttendanceTable;
use crate::modules::attendance::core::session::UploadSession;
use crate::modules::attendance::use_cases::auto_process_pending::decide::decide;
use crate::modules::attendance::use_cases::auto_process_pending::decision::Decision;
use crate::shared::infrastructure::notification_sink::{NotificationSink, notify};
use crate::shared::infrastructure::participation_store::{
    ParticipationStore, ParticipationStoreError,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("no attendance file has been uploaded")]
    NoAttendanceFile,

    #[error("the uploaded attendance file has already been processed")]
    AlreadyProcessed,

    #[error(transparent)]
    Store(#[from] ParticipationStoreError),

    #[error("auto-processing aborted: {0}")]
    Aborted(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipationOutcome {
    pub participation_id: String,
    pub student_identifier: String,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub batch_id: String,
    pub generation: u64,
    pub outcomes: Vec<ParticipationOutcome>,
    pub summary: BatchSummary,
    pub remaining_pending: Option<usize>,
    pub completed_at: i64,
}

enum Pending {
    Settled(Outcome),
    Dispatched(JoinHandle<Outcome>, Match),
}

pub struct AutoProcessPendingHandler<TStore, TSink>
where
    TStore: ParticipationStore + ?Sized + 'static,
    TSink: NotificationSink + 'static,
{
    policy: DecisionPolicy,
    store: Arc<TStore>,
    session: Arc<UploadSession>,
    sink: Arc<TSink>,
}

impl<TStore, TSink> AutoProcessPendingHandler<TStore, TSink>
where
    TStore: ParticipationStore + ?Sized + 'static,
    TSink: NotificationSink + 'static,
{
    pub fn new(
        policy: DecisionPolicy,
        store: Arc<TStore>,
        session: Arc<UploadSession>,
        sink: Arc<TSink>,
    ) -> Self {
        Self {
            policy,
            store,
            session,
            sink,
        }
    }

    pub async fn handle(&self) -> Result<BatchReport, ApplicationError> {
        let (generation, table) = self
            .session
            .current()
            .await
            .ok_or(ApplicationError::NoAttendanceFile)?;
        if !self.session.try_claim(generation).await {
            return Err(ApplicationError::AlreadyProcessed);
        }

        // Once claimed, the batch settles and reports even if the caller goes away.
        let batch = Batch {
            batch_id: Uuid::now_v7().to_string(),
            generation,
            table,
            policy: self.policy,
            store: Arc::clone(&self.store),
            session: Arc::clone(&self.session),
            sink: Arc::clone(&self.sink),
        };
        tokio::spawn(batch.run())
            .await
            .map_err(|error| ApplicationError::Aborted(error.to_string()))?
    }
}

struct Batch<TStore, TSink>
where
    TStore: ParticipationStore + ?Sized + 'static,
    TSink: NotificationSink + 'static,
{
    batch_id: String,
    generation: u64,
    table: Arc<AttendanceTable>,
    policy: DecisionPolicy,
    store: Arc<TStore>,
    session: Arc<UploadSession>,
    sink: Arc<TSink>,
}

impl<TStore, TSink> Batch<TStore, TSink>
where
    TStore: ParticipationStore + ?Sized + 'static,
    TSink: NotificationSink + 'static,
{
    async fn run(self) -> Result<BatchReport, ApplicationError> {
        let participations = match self.store.list_pending().await {
            Ok(participations) => participations,
            Err(error) => {
                self.session.release(self.generation).await;
                return Err(error.into());
            }
        };

        let batch_id = self.batch_id.clone();
        tracing::info!(%batch_id, generation = self.generation, pending = participations.len(), "auto-processing pending participations");

        let dispatched: Vec<(ParticipationRecord, Pending)> = participations
            .into_iter()
            .map(|participation| {
                let pending = match decide(&participation, &self.table, &self.policy) {
                    Decision::Transition { verdict, matched } => Pending::Dispatched(
                        self.dispatch(participation.id.clone(), verdict, matched.clone()),
                        matched,
                    ),
                    Decision::Unresolved => Pending::Settled(Outcome::Unresolved),
                    Decision::NotPending => Pending::Settled(Outcome::NotPending),
                };
                (participation, pending)
            })
            .collect();

        let mut summary = BatchSummary::default();
        let mut outcomes = Vec::with_capacity(dispatched.len());
        for (participation, pending) in dispatched {
            let outcome = match pending {
                Pending::Settled(outcome) => outcome,
                Pending::Dispatched(handle, matched) => match handle.await {
                    Ok(outcome) => outcome,
                    Err(error) => Outcome::Failed {
                        matched,
                        error: error.to_string(),
                    },
                },
            };
            match &outcome {
                Outcome::Failed { error, .. } => tracing::warn!(
                    participation_id = %participation.id,
                    %error,
                    "participation left pending, status update failed"
                ),
                Outcome::Unresolved => tracing::debug!(
                    participation_id = %participation.id,
                    student_identifier = %participation.student_identifier,
                    "attendance not found"
                ),
                _ => {}
            }
            summary.record(&outcome);
            notify(
                &*self.sink,
                AttendanceNotification::ParticipationDecided {
                    participation_id: participation.id.clone(),
                    outcome: outcome.clone(),
                },
            )
            .await;
            outcomes.push(ParticipationOutcome {
                participation_id: participation.id,
                student_identifier: participation.student_identifier,
                outcome,
            });
        }

        let remaining_pending = match self.store.list_pending().await {
            Ok(pending) => Some(pending.len()),
            Err(error) => {
                tracing::warn!(%batch_id, %error, "could not refresh pending participations");
                None
            }
        };

        tracing::info!(
            %batch_id,
            approved = summary.approved,
            rejected = summary.rejected,
            failed = summary.failed,
            unresolved = summary.unresolved,
            "auto-processing finished"
        );
        notify(
            &*self.sink,
            AttendanceNotification::BatchCompleted {
                batch_id: batch_id.clone(),
                summary: summary.clone(),
            },
        )
        .await;

        Ok(BatchReport {
            batch_id,
            generation: self.generation,
            outcomes,
            summary,
            remaining_pending,
            completed_at: Utc::now().timestamp_millis(),
        })
    }

    fn dispatch(
        &self,
        participation_id: String,
        verdict: Verdict,
        matched: Match,
    ) -> JoinHandle<Outcome> {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            match store.set_status(&participation_id, verdict).await {
                Ok(()) => match verdict {
                    Verdict::Approve => Outcome::Approved { matched },
                    Verdict::Reject => Outcome::Rejected { matched },
                },
                Err(ParticipationStoreError::NotPending { .. }) => Outcome::NotPending,
                Err(error) => Outcome::Failed {
                    matched,
                    error: error.to_string(),
                },
            }
        })
    }
}
