//! Decision strategies
//!
//! A strategy reduces the seven-outcome evaluation algebra to the binary
//! decision the enforcement layer acts on. The set is closed: enforcement
//! contracts are written against these three identifiers, so adding one is
//! a breaking change.

use serde::{Deserialize, Serialize};

use crate::evaluation::EvaluationResult;

use super::decision::Decision;

/// Reduction from evaluation outcomes to PERMIT/DENY.
///
/// PERMIT and DENY always pass through unchanged; the strategies differ only
/// in how they treat NOT_APPLICABLE and the indeterminate family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionStrategy {
    /// Anything that is not a clear permit or deny becomes DENY.
    DefaultDeny,
    /// Anything that is not a clear permit or deny becomes PERMIT.
    DefaultPermit,
    /// NOT_APPLICABLE becomes PERMIT, any indeterminate becomes DENY.
    NotApplicablePermitIndeterminateDeny,
}

impl DecisionStrategy {
    /// Maps an evaluation result to the final decision.
    pub fn decide(self, result: &EvaluationResult) -> Decision {
        if result.is_permit() {
            return Decision::Permit;
        }
        if result.is_deny() {
            return Decision::Deny;
        }
        match self {
            Self::DefaultDeny => Decision::Deny,
            Self::DefaultPermit => Decision::Permit,
            Self::NotApplicablePermitIndeterminateDeny => {
                if result.is_indeterminate() {
                    Decision::Deny
                } else {
                    Decision::Permit
                }
            }
        }
    }
}
