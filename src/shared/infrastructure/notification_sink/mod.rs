// Outbound port for operator notifications (progress, outcomes, batch summaries).
//
// Delivery is best effort: a failing sink is logged and never fails the use case.

pub mod broadcast;
pub mod in_memory;
pub mod logging;

use crate::modules::attendance::core::notifications::AttendanceNotification;
use async_trait::async_trait;

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn publish(&self, notification: AttendanceNotification) -> anyhow::Result<()>;
}

pub async fn notify<TSink>(sink: &TSink, notification: AttendanceNotification)
where
    TSink: NotificationSink + ?Sized,
{
    if let Err(error) = sink.publish(notification).await {
        tracing::warn!(%error, "notification could not be delivered");
    }
}
