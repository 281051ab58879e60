use crate::modules::attendance::core::notifications::AttendanceNotification;
use crate::shared::infrastructure::notification_sink::NotificationSink;

/// Writes notifications to the log, then forwards them to the wrapped sink.
pub struct LoggingNotificationSink<TSink: NotificationSink> {
    inner: TSink,
}

impl<TSink: NotificationSink> LoggingNotificationSink<TSink> {
    pub fn new(inner: TSink) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &TSink {
        &self.inner
    }
}

#[async_trait::async_trait]
impl<TSink: NotificationSink> NotificationSink for LoggingNotificationSink<TSink> {
    async fn publish(&self, notification: AttendanceNotification) -> anyhow::Result<()> {
        match &notification {
            AttendanceNotification::IngestProgress { percent } => {
                tracing::trace!(percent, "ingest progress")
            }
            AttendanceNotification::IngestFailed { reason } => {
                tracing::warn!(%reason, "ingest failed")
            }
            other => tracing::debug!(notification = ?other, "notification"),
        }
        self.inner.publish(notification).await
    }
}
