//! The decision handed to the enforcement layer

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::evaluation::IndeterminateCause;

/// Binary authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Permit,
    Deny,
}

/// Observability payload attached to a decision: either the indeterminate
/// cause tree or a short explanatory string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecisionDetails {
    Cause(IndeterminateCause),
    Message(String),
}

/// The final answer of the PDP for one request.
///
/// Exactly three fields; `details` carries the cause tree for indeterminate
/// evaluations, a short message for inapplicable ones, and nothing
/// otherwise. The timestamp is captured when the decision is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthzDecision {
    /// Whether the request is permitted.
    pub decision: Decision,
    /// Milliseconds since the Unix epoch at decision construction.
    pub timestamp: i64,
    /// Optional observability payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<DecisionDetails>,
}

impl AuthzDecision {
    pub fn new(decision: Decision, details: Option<DecisionDetails>) -> Self {
        Self { decision, timestamp: Utc::now().timestamp_millis(), details }
    }

    pub fn is_permit(&self) -> bool {
        self.decision == Decision::Permit
    }

    pub fn is_deny(&self) -> bool {
        self.decision == Decision::Deny
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::CauseCode;

    #[test]
    fn details_serialize_flat() {
        let message = AuthzDecision::new(
            Decision::Permit,
            Some(DecisionDetails::Message("No policy applicable".into())),
        );
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["decision"], "PERMIT");
        assert_eq!(json["details"], "No policy applicable");

        let cause = AuthzDecision::new(
            Decision::Deny,
            Some(DecisionDetails::Cause(IndeterminateCause::new(CauseCode::SyntaxError))),
        );
        let json = serde_json::to_value(&cause).unwrap();
        assert_eq!(json["details"]["code"], "SYNTAX_ERROR");
    }

    #[test]
    fn absent_details_are_omitted() {
        let decision = AuthzDecision::new(Decision::Permit, None);
        let json = serde_json::to_value(&decision).unwrap();
        assert!(json.get("details").is_none());
        assert!(json["timestamp"].is_i64());
    }
}
