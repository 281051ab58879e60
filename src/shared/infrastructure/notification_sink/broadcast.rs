// Fan-out sink backing the operator's live socket channel.
//
// Every connected listener holds a receiver. Publishing with no listener is not an error.

use crate::modules::attendance::core::notifications::AttendanceNotification;
use crate::shared::infrastructure::notification_sink::NotificationSink;
use tokio::sync::broadcast;

pub struct BroadcastNotificationSink {
    sender: broadcast::Sender<AttendanceNotification>,
}

impl BroadcastNotificationSink {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AttendanceNotification> {
        self.sender.subscribe()
    }
}

#[async_trait::async_trait]
impl NotificationSink for BroadcastNotificationSink {
    async fn publish(&self, notification: AttendanceNotification) -> anyhow::Result<()> {
        // send only fails when nobody listens
        let _ = self.sender.send(notification);
        Ok(())
    }
}
