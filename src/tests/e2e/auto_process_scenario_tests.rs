use crate::modules::attendance::core::notifications::{AttendanceNotification, Outcome};
use crate::modules::attendance::core::participation::{ParticipationStatus, Verdict};
use crate::modules::attendance::core::policy::DecisionPolicy;
use crate::modules::attendance::core::session::UploadSession;
use crate::modules::attendance::use_cases::auto_process_pending::handler::{
    ApplicationError, AutoProcessPendingHandler,
};
use crate::modules::attendance::use_cases::ingest_spreadsheet::handler::IngestSpreadsheetHandler;
use crate::modules::attendance::use_cases::ingest_spreadsheet::ingestor::IngestOptions;
use crate::shared::infrastructure::notification_sink::in_memory::InMemoryNotificationSink;
use crate::shared::infrastructure::participation_store::in_memory::InMemoryParticipationStore;
use crate::shared::infrastructure::participation_store::retrying::{
    RetryPolicy, RetryingParticipationStore,
};
use crate::tests::fixtures::participations::ParticipationRecordBuilder;
use crate::tests::fixtures::sheets::{GridReader, scenario_rows};
use std::sync::Arc;

#[tokio::test]
async fn settles_pending_participations_from_an_uploaded_sheet() {
    let store = Arc::new(RetryingParticipationStore::new(
        InMemoryParticipationStore::with_records(vec![
            ParticipationRecordBuilder::new()
                .id("p-c33")
                .student_identifier("c33")
                .build(),
            ParticipationRecordBuilder::new()
                .id("p-c99")
                .student_identifier("c99")
                .build(),
            ParticipationRecordBuilder::new()
                .id("p-missing")
                .student_identifier("22bq1a0501")
                .build(),
            ParticipationRecordBuilder::new()
                .id("p-attended")
                .student_identifier("c33")
                .status(ParticipationStatus::Attended)
                .build(),
        ]),
        RetryPolicy::default(),
    ));
    let session = Arc::new(UploadSession::new());
    let sink = Arc::new(InMemoryNotificationSink::new());
    let ingest = IngestSpreadsheetHandler::new(
        IngestOptions::default(),
        Arc::new(GridReader::rows(scenario_rows())),
        session.clone(),
        sink.clone(),
    );
    let auto_process = AutoProcessPendingHandler::new(
        DecisionPolicy::default(),
        store.clone(),
        session.clone(),
        sink.clone(),
    );

    let uploaded = ingest.handle(b"attendance.xlsx".to_vec()).await.unwrap();
    assert_eq!(uploaded.record_count, 2);

    let report = auto_process.handle().await.unwrap();
    assert_eq!(report.summary.approved, 1);
    assert_eq!(report.summary.rejected, 1);
    assert_eq!(report.summary.unresolved, 1);
    assert_eq!(report.summary.failed, 0);
    assert_eq!(report.remaining_pending, Some(1));

    let mut calls = store.inner().calls().await;
    calls.sort_by(|left, right| left.0.cmp(&right.0));
    assert_eq!(
        calls,
        vec![
            ("p-c33".to_string(), Verdict::Approve),
            ("p-c99".to_string(), Verdict::Reject),
        ]
    );
    assert_eq!(
        store.inner().status_of("p-missing").await,
        Some(ParticipationStatus::Pending)
    );
    assert_eq!(
        store.inner().status_of("p-attended").await,
        Some(ParticipationStatus::Attended)
    );
    let missing = report
        .outcomes
        .iter()
        .find(|outcome| outcome.participation_id == "p-missing")
        .unwrap();
    assert_eq!(missing.outcome, Outcome::Unresolved);

    let second = auto_process.handle().await;
    assert!(matches!(second, Err(ApplicationError::AlreadyProcessed)));
    assert_eq!(store.inner().calls().await.len(), 2);

    let notifications = sink.notifications.lock().await;
    let progress: Vec<u8> = notifications
        .iter()
        .filter_map(|notification| match notification {
            AttendanceNotification::IngestProgress { percent } => Some(*percent),
            _ => None,
        })
        .collect();
    assert_eq!(progress.first(), Some(&0));
    assert_eq!(progress.last(), Some(&100));
    assert!(matches!(
        notifications.last(),
        Some(AttendanceNotification::BatchCompleted { .. })
    ));
}

#[tokio::test]
async fn a_reupload_allows_another_run() {
    let store = Arc::new(InMemoryParticipationStore::with_records(vec![
        ParticipationRecordBuilder::new()
            .id("p-c33")
            .student_identifier("c33")
            .build(),
    ]));
    let session = Arc::new(UploadSession::new());
    let sink = Arc::new(InMemoryNotificationSink::new());
    let ingest = IngestSpreadsheetHandler::new(
        IngestOptions::default(),
        Arc::new(GridReader::rows(scenario_rows())),
        session.clone(),
        sink.clone(),
    );
    let auto_process =
        AutoProcessPendingHandler::new(DecisionPolicy::default(), store.clone(), session, sink);

    ingest.handle(b"first".to_vec()).await.unwrap();
    auto_process.handle().await.unwrap();
    store
        .insert(
            ParticipationRecordBuilder::new()
                .id("p-late")
                .student_identifier("c99")
                .build(),
        )
        .await;

    ingest.handle(b"second".to_vec()).await.unwrap();
    let report = auto_process.handle().await.unwrap();

    assert_eq!(report.summary.rejected, 1);
    assert_eq!(
        store.status_of("p-late").await,
        Some(ParticipationStatus::Rejected)
    );
}
