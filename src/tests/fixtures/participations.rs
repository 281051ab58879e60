// Shared test fixture for participation records.
// Defaults come from json/participation_record.json; tests override what they care about.

use crate::modules::attendance::core::participation::{ParticipationRecord, ParticipationStatus};
use std::fs;

const DEFAULT_RECORD_PATH: &str = "./src/tests/fixtures/json/participation_record.json";

pub struct ParticipationRecordBuilder {
    inner: ParticipationRecord,
}

impl Default for ParticipationRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl ParticipationRecordBuilder {
    pub fn new() -> Self {
        let json_str = fs::read_to_string(DEFAULT_RECORD_PATH).unwrap();
        Self {
            inner: serde_json::from_str(&json_str).unwrap(),
        }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn event_id(mut self, v: impl Into<String>) -> Self {
        self.inner.event_id = v.into();
        self
    }

    pub fn student_identifier(mut self, v: impl Into<String>) -> Self {
        self.inner.student_identifier = v.into();
        self
    }

    pub fn status(mut self, v: ParticipationStatus) -> Self {
        self.inner.status = v;
        self
    }

    pub fn build(self) -> ParticipationRecord {
        self.inner
    }
}

#[cfg(test)]
mod participation_record_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_start_from_a_pending_record() {
        let record = ParticipationRecordBuilder::default().build();
        assert_eq!(record.id, "p-0001");
        assert_eq!(record.event_id, "e-0001");
        assert_eq!(record.student_identifier, "231fa04c33");
        assert!(record.is_pending());
    }

    #[rstest]
    fn it_should_override_fields() {
        let record = ParticipationRecordBuilder::new()
            .id("p-9")
            .event_id("e-9")
            .student_identifier("c99")
            .status(ParticipationStatus::Attended)
            .build();
        assert_eq!(
            record,
            ParticipationRecord {
                id: "p-9".into(),
                event_id: "e-9".into(),
                student_identifier: "c99".into(),
                status: ParticipationStatus::Attended,
            }
        );
    }
}
