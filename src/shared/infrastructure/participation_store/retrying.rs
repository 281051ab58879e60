// Timeout and retry policy of the participation store client.
//
// Wraps any ParticipationStore. Each attempt is bounded by a timeout; transient failures
// (timeouts, backend errors) are retried with a linear backoff. NotFound and NotPending are final.

use crate::modules::attendance::core::participation::{ParticipationRecord, Verdict};
use crate::shared::infrastructure::participation_store::{
    ParticipationStore, ParticipationStoreError,
};
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    pub retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5_000),
            retries: 2,
            backoff: Duration::from_millis(100),
        }
    }
}

pub struct RetryingParticipationStore<TStore: ParticipationStore> {
    inner: TStore,
    policy: RetryPolicy,
}

impl<TStore: ParticipationStore> RetryingParticipationStore<TStore> {
    pub fn new(inner: TStore, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &TStore {
        &self.inner
    }

    async fn attempt<T, F, Fut>(&self, operation: &str, call: F) -> Result<T, ParticipationStoreError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ParticipationStoreError>>,
    {
        let timeout_ms = self.policy.timeout.as_millis() as u64;
        let mut attempt = 0;
        loop {
            let result = match tokio::time::timeout(self.policy.timeout, call()).await {
                Ok(result) => result,
                Err(_) => Err(ParticipationStoreError::Timeout(timeout_ms)),
            };
            match result {
                Err(error) if error.is_transient() && attempt < self.policy.retries => {
                    attempt += 1;
                    tracing::debug!(operation, attempt, %error, "retrying participation store call");
                    tokio::time::sleep(self.policy.backoff * attempt).await;
                }
                other => return other,
            }
        }
    }
}

#[async_trait::async_trait]
impl<TStore: ParticipationStore> ParticipationStore for RetryingParticipationStore<TStore> {
    async fn list_pending(&self) -> Result<Vec<ParticipationRecord>, ParticipationStoreError> {
        self.attempt("list_pending", || self.inner.list_pending())
            .await
    }

    async fn set_status(
        &self,
        participation_id: &str,
        verdict: Verdict,
    ) -> Result<(), ParticipationStoreError> {
        self.attempt("set_status", || self.inner.set_status(participation_id, verdict))
            .await
    }
}
