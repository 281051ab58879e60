use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipationStatus {
    Pending,
    Approved,
    Rejected,
    Attended,
    Completed,
}

/// A student's registration for an event, as held by the participation store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipationRecord {
    pub id: String,
    pub event_id: String,
    pub student_identifier: String,
    pub status: ParticipationStatus,
}

impl ParticipationRecord {
    pub fn is_pending(&self) -> bool {
        self.status == ParticipationStatus::Pending
    }
}

/// The transition the engine asks the store to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approve,
    Reject,
}

impl Verdict {
    pub fn target_status(self) -> ParticipationStatus {
        match self {
            Verdict::Approve => ParticipationStatus::Approved,
            Verdict::Reject => ParticipationStatus::Rejected,
        }
    }
}

#[cfg(test)]
mod participation_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ParticipationStatus::Pending, true)]
    #[case(ParticipationStatus::Approved, false)]
    #[case(ParticipationStatus::Rejected, false)]
    #[case(ParticipationStatus::Attended, false)]
    #[case(ParticipationStatus::Completed, false)]
    fn it_should_only_be_pending_in_the_pending_status(
        #[case] status: ParticipationStatus,
        #[case] expected: bool,
    ) {
        let record = ParticipationRecord {
            id: "p-1".into(),
            event_id: "e-1".into(),
            student_identifier: "c33".into(),
            status,
        };
        assert_eq!(record.is_pending(), expected);
    }

    #[rstest]
    fn it_should_map_verdicts_onto_statuses() {
        assert_eq!(Verdict::Approve.target_status(), ParticipationStatus::Approved);
        assert_eq!(Verdict::Reject.target_status(), ParticipationStatus::Rejected);
    }

    #[rstest]
    fn it_should_serialize_the_status_in_snake_case() {
        let json = serde_json::to_value(ParticipationStatus::Pending).unwrap();
        assert_eq!(json, serde_json::json!("pending"));
    }
}
