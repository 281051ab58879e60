// Upload flow: read the file, ingest it, publish the table into the upload session.
//
// Responsibilities
// - Start a new session generation, which also resets the "already processed" guard.
// - Read the workbook off the async runtime.
// - Publish the table only if no newer upload or clear happened meanwhile.
// - Emit the terminal completed or failed notification.

use crate::modules::attendance::core::notifications::AttendanceNotification;
use crate::modules::attendance::use_cases::ingest_spreadsheet::reader_port::SpreadsheetReader;
use crate::modules::attendance::core::session::UploadSession;
use crate::modules::attendance::use_cases::ingest_spreadsheet::ingestor::{
    IngestError, IngestOptions, Ingestor,
};
use crate::shared::infrastructure::notification_sink::{NotificationSink, notify};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub generation: u64,
    pub record_count: usize,
    pub skipped_rows: usize,
}

pub struct IngestSpreadsheetHandler<TReader, TSink>
where
    TReader: SpreadsheetReader + ?Sized + 'static,
    TSink: NotificationSink + 'static,
{
    ingestor: Ingestor,
    reader: Arc<TReader>,
    session: Arc<UploadSession>,
    sink: Arc<TSink>,
}

impl<TReader, TSink> IngestSpreadsheetHandler<TReader, TSink>
where
    TReader: SpreadsheetReader + ?Sized + 'static,
    TSink: NotificationSink + 'static,
{
    pub fn new(
        options: IngestOptions,
        reader: Arc<TReader>,
        session: Arc<UploadSession>,
        sink: Arc<TSink>,
    ) -> Self {
        Self {
            ingestor: Ingestor::new(options),
            reader,
            session,
            sink,
        }
    }

    pub async fn handle(&self, bytes: Vec<u8>) -> Result<IngestReport, IngestError> {
        let generation = self.session.begin_upload().await;
        tracing::info!(generation, size = bytes.len(), "attendance upload received");

        match self.ingest(generation, bytes).await {
            Ok(report) => {
                notify(
                    &*self.sink,
                    AttendanceNotification::IngestCompleted {
                        record_count: report.record_count,
                        skipped_rows: report.skipped_rows,
                    },
                )
                .await;
                Ok(report)
            }
            Err(IngestError::Superseded) => Err(IngestError::Superseded),
            Err(error) => {
                tracing::warn!(generation, %error, "attendance upload rejected");
                notify(
                    &*self.sink,
                    AttendanceNotification::IngestFailed {
                        reason: error.to_string(),
                    },
                )
                .await;
                Err(error)
            }
        }
    }

    pub async fn clear(&self) {
        self.session.clear().await;
        tracing::info!("attendance upload cleared");
        notify(&*self.sink, AttendanceNotification::AttendanceCleared).await;
    }

    async fn ingest(&self, generation: u64, bytes: Vec<u8>) -> Result<IngestReport, IngestError> {
        let reader = Arc::clone(&self.reader);
        let rows = tokio::task::spawn_blocking(move || reader.read_rows(&bytes))
            .await
            .map_err(|error| IngestError::Unreadable(error.to_string()))??;

        let outcome = self
            .ingestor
            .ingest(rows, generation, &self.session, &*self.sink)
            .await?;
        let report = IngestReport {
            generation,
            record_count: outcome.table.len(),
            skipped_rows: outcome.skipped_rows,
        };
        if !self.session.publish(generation, outcome.table).await {
            return Err(IngestError::Superseded);
        }
        Ok(report)
    }
}
