use crate::modules::attendance::core::participation::Verdict;

pub const DEFAULT_APPROVAL_THRESHOLD: f64 = 75.0;

/// Threshold policy for auto-decisioning. The threshold is inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionPolicy {
    pub approval_threshold: f64,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            approval_threshold: DEFAULT_APPROVAL_THRESHOLD,
        }
    }
}

impl DecisionPolicy {
    pub fn new(approval_threshold: f64) -> Self {
        Self { approval_threshold }
    }

    pub fn classify(&self, percentage: f64) -> Verdict {
        if percentage >= self.approval_threshold {
            Verdict::Approve
        } else {
            Verdict::Reject
        }
    }
}
