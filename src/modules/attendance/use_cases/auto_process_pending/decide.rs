// Pure decision function for auto-processing one participation.
//
// Responsibilities
// - Leave anything that is not pending alone.
// - Never reject for missing data: no match means Unresolved.
// - Otherwise classify the matched percentage with the threshold policy.
// - Never perform input or output.

use crate::modules::attendance::core::matcher::resolve;
use crate::modules::attendance::core::participation::ParticipationRecord;
use crate::modules::attendance::core::policy::DecisionPolicy;
use crate::modules::attendance::core::record::AttendanceTable;
use crate::modules::attendance::use_cases::auto_process_pending::decision::Decision;

pub fn decide(
    participation: &ParticipationRecord,
    table: &AttendanceTable,
    policy: &DecisionPolicy,
) -> Decision {
    if !participation.is_pending() {
        return Decision::NotPending;
    }
    match resolve(&participation.student_identifier, table) {
        Some(matched) => Decision::Transition {
            verdict: policy.classify(matched.percentage),
            matched,
        },
        None => Decision::Unresolved,
    }
}
