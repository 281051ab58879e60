// Builds an attendance table from a grid of rows.
//
// Purpose
// - Keep a large sheet from monopolising the runtime: rows are consumed in bounded batches and the
//   task yields between them.
//
// Responsibilities
// - Locate the header, extract records, count skipped rows.
// - Report strictly increasing progress, ending at 100.
// - Stop as soon as the upload generation it runs for is no longer current.

use crate::modules::attendance::core::notifications::AttendanceNotification;
use crate::modules::attendance::core::record::{AttendanceTable, Cell, DuplicatePolicy};
use crate::modules::attendance::core::session::UploadSession;
use crate::modules::attendance::use_cases::ingest_spreadsheet::header::{
    DEFAULT_HEADER_SCAN_LIMIT, FormatError, locate_header,
};
use crate::modules::attendance::use_cases::ingest_spreadsheet::rows::extract_record;
use crate::shared::infrastructure::notification_sink::{NotificationSink, notify};

pub const DEFAULT_BATCH_SIZE: usize = 500;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("spreadsheet could not be read: {0}")]
    Unreadable(String),

    #[error("unsupported attendance file: {0}")]
    UnsupportedFormat(String),

    #[error("upload was superseded by a newer upload or a clear")]
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    pub header_scan_limit: usize,
    pub batch_size: usize,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            header_scan_limit: DEFAULT_HEADER_SCAN_LIMIT,
            batch_size: DEFAULT_BATCH_SIZE,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

#[derive(Debug)]
pub struct IngestOutcome {
    pub table: AttendanceTable,
    pub skipped_rows: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    options: IngestOptions,
}

impl Ingestor {
    pub fn new(options: IngestOptions) -> Self {
        Self { options }
    }

    pub async fn ingest<TSink>(
        &self,
        rows: Vec<Vec<Cell>>,
        generation: u64,
        session: &UploadSession,
        sink: &TSink,
    ) -> Result<IngestOutcome, IngestError>
    where
        TSink: NotificationSink + ?Sized,
    {
        let layout = locate_header(&rows, self.options.header_scan_limit)?;
        let data_rows = &rows[layout.row_index + 1..];
        let total = data_rows.len();

        let mut table = AttendanceTable::new();
        let mut skipped_rows = 0;
        let mut processed = 0;
        let mut progress = Progress::default();
        progress.report(0, sink).await;

        for batch in data_rows.chunks(self.options.batch_size.max(1)) {
            if !session.is_current(generation).await {
                tracing::debug!(generation, "ingestion abandoned, upload superseded");
                return Err(IngestError::Superseded);
            }
            for row in batch {
                match extract_record(&layout, row) {
                    Some(record) => {
                        table.insert(record, self.options.duplicate_policy);
                    }
                    None => skipped_rows += 1,
                }
            }
            processed += batch.len();
            progress.report((processed * 100 / total) as u8, sink).await;
            tokio::task::yield_now().await;
        }
        progress.report(100, sink).await;

        tracing::info!(
            records = table.len(),
            skipped_rows,
            header_row = layout.row_index,
            "attendance sheet ingested"
        );
        Ok(IngestOutcome {
            table,
            skipped_rows,
        })
    }
}

#[derive(Default)]
struct Progress {
    last: Option<u8>,
}

impl Progress {
    async fn report<TSink>(&mut self, percent: u8, sink: &TSink)
    where
        TSink: NotificationSink + ?Sized,
    {
        if self.last.is_some_and(|last| percent <= last) {
            return;
        }
        self.last = Some(percent);
        notify(sink, AttendanceNotification::IngestProgress { percent }).await;
    }
}

#[cfg(test)]
mod ingestor_tests {
    use super::*;
    use crate::shared::infrastructure::notification_sink::in_memory::InMemoryNotificationSink;
    use crate::tests::fixtures::sheets::{attendance_sheet, scenario_rows};
    use rstest::rstest;

    async fn ingest_with(
        options: IngestOptions,
        rows: Vec<Vec<Cell>>,
    ) -> (Result<IngestOutcome, IngestError>, InMemoryNotificationSink) {
        let session = UploadSession::new();
        let sink = InMemoryNotificationSink::new();
        let generation = session.begin_upload().await;
        let result = Ingestor::new(options)
            .ingest(rows, generation, &session, &sink)
            .await;
        (result, sink)
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_build_the_table_from_the_scenario_sheet() {
        let (result, _) = ingest_with(IngestOptions::default(), scenario_rows()).await;
        let outcome = result.expect("expected ingestion to succeed");

        assert_eq!(outcome.table.len(), 2);
        assert_eq!(outcome.skipped_rows, 0);
        let record = outcome.table.get("231fa04c33").unwrap();
        assert_eq!(record.percentage, 82.0);
        assert_eq!(record.subject_breakdown.get("M1"), Some(&"x".to_string()));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_count_only_rows_with_identifier_and_percentage() {
        let mut rows = attendance_sheet(&[("231fa04c01", 90.0), ("231fa04c02", 50.0)]);
        rows.push(vec![Cell::Empty, Cell::from("x"), Cell::Number(70.0)]);
        rows.push(vec![Cell::from("231fa04c03"), Cell::from("x"), Cell::Empty]);
        rows.push(vec![]);

        let (result, _) = ingest_with(IngestOptions::default(), rows).await;
        let outcome = result.unwrap();
        assert_eq!(outcome.table.len(), 2);
        assert_eq!(outcome.skipped_rows, 3);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_strictly_increasing_progress_ending_at_100() {
        let students: Vec<(String, f64)> = (0..1_000)
            .map(|n| (format!("231fa04{n:04}"), (n % 100) as f64))
            .collect();
        let borrowed: Vec<(&str, f64)> = students.iter().map(|(id, pct)| (id.as_str(), *pct)).collect();
        let options = IngestOptions {
            batch_size: 64,
            ..IngestOptions::default()
        };

        let (result, sink) = ingest_with(options, attendance_sheet(&borrowed)).await;
        assert_eq!(result.unwrap().table.len(), 1_000);

        let progress = sink.progress().await;
        assert_eq!(progress.first(), Some(&0));
        assert_eq!(progress.last(), Some(&100));
        assert!(progress.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(progress.len() > 2);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_0_and_100_for_a_sheet_without_data_rows() {
        let (result, sink) = ingest_with(IngestOptions::default(), attendance_sheet(&[])).await;
        assert!(result.unwrap().table.is_empty());
        assert_eq!(sink.progress().await, vec![0, 100]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_without_a_header() {
        let rows = vec![vec![Cell::from("Name"), Cell::from("Percent")]];
        let (result, sink) = ingest_with(IngestOptions::default(), rows).await;
        assert!(matches!(
            result,
            Err(IngestError::Format(FormatError::HeaderNotFound))
        ));
        assert!(sink.progress().await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_stop_when_the_generation_is_superseded() {
        let session = UploadSession::new();
        let sink = InMemoryNotificationSink::new();
        let stale = session.begin_upload().await;
        session.clear().await;

        let result = Ingestor::default()
            .ingest(scenario_rows(), stale, &session, &sink)
            .await;
        assert!(matches!(result, Err(IngestError::Superseded)));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_apply_the_duplicate_policy() {
        let rows = attendance_sheet(&[("231fa04c33", 40.0), ("231FA04C33", 90.0)]);

        let (result, _) = ingest_with(IngestOptions::default(), rows.clone()).await;
        assert_eq!(result.unwrap().table.get("231fa04c33").unwrap().percentage, 90.0);

        let options = IngestOptions {
            duplicate_policy: DuplicatePolicy::FirstRowWins,
            ..IngestOptions::default()
        };
        let (result, _) = ingest_with(options, rows).await;
        assert_eq!(result.unwrap().table.get("231fa04c33").unwrap().percentage, 40.0);
    }
}
