use crate::modules::attendance::use_cases::ingest_spreadsheet::reader_port::SpreadsheetReader;
use crate::modules::attendance::core::session::UploadSession;
use crate::modules::attendance::use_cases::auto_process_pending::handler::AutoProcessPendingHandler;
use crate::modules::attendance::use_cases::ingest_spreadsheet::handler::IngestSpreadsheetHandler;
use crate::shared::infrastructure::notification_sink::broadcast::BroadcastNotificationSink;
use crate::shared::infrastructure::notification_sink::logging::LoggingNotificationSink;
use crate::shared::infrastructure::participation_store::ParticipationStore;
use crate::shell::config::AppConfig;
use std::sync::Arc;

pub type AppSink = LoggingNotificationSink<BroadcastNotificationSink>;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ParticipationStore>,
    pub ingest_handler: Arc<IngestSpreadsheetHandler<dyn SpreadsheetReader, AppSink>>,
    pub auto_process_handler: Arc<AutoProcessPendingHandler<dyn ParticipationStore, AppSink>>,
    pub sink: Arc<AppSink>,
}

impl AppState {
    /// Wires both use cases around one upload session and one notification channel.
    pub fn build(
        config: &AppConfig,
        reader: Arc<dyn SpreadsheetReader>,
        store: Arc<dyn ParticipationStore>,
    ) -> Self {
        let session = Arc::new(UploadSession::new());
        let sink = Arc::new(LoggingNotificationSink::new(BroadcastNotificationSink::new(
            config.notification_capacity,
        )));
        let ingest_handler = Arc::new(IngestSpreadsheetHandler::new(
            config.ingest_options(),
            reader,
            session.clone(),
            sink.clone(),
        ));
        let auto_process_handler = Arc::new(AutoProcessPendingHandler::new(
            config.decision_policy(),
            store.clone(),
            session,
            sink.clone(),
        ));
        Self {
            store,
            ingest_handler,
            auto_process_handler,
            sink,
        }
    }
}
