use crate::modules::attendance::core::matcher::Match;
use crate::modules::attendance::core::participation::Verdict;

/// What the engine intends to do with one participation.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Transition { verdict: Verdict, matched: Match },
    /// No attendance row matched. Left pending for the operator.
    Unresolved,
    NotPending,
}
