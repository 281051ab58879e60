use crate::modules::attendance::core::notifications::AttendanceNotification;
use crate::shared::infrastructure::notification_sink::NotificationSink;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryNotificationSink {
    pub notifications: Mutex<Vec<AttendanceNotification>>,
    is_offline: bool,
}

impl InMemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn progress(&self) -> Vec<u8> {
        self.notifications
            .lock()
            .await
            .iter()
            .filter_map(|notification| match notification {
                AttendanceNotification::IngestProgress { percent } => Some(*percent),
                _ => None,
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl NotificationSink for InMemoryNotificationSink {
    async fn publish(&self, notification: AttendanceNotification) -> anyhow::Result<()> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Notification sink offline"));
        }
        self.notifications.lock().await.push(notification);
        Ok(())
    }
}
