//! Evaluation result types
//!
//! Two closed algebras: expressions evaluate to MATCH / NO_MATCH /
//! INDETERMINATE, policy elements evaluate to one of seven outcomes: the
//! four XACML decisions plus indeterminate provenance (which of permit,
//! deny, or both remained possible when evaluation broke down).

use serde::{Deserialize, Serialize};

use super::cause::IndeterminateCause;

/// Outcome of evaluating an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchOutcome {
    /// The expression holds for the context.
    Match,
    /// The expression does not hold for the context.
    NoMatch,
    /// The expression could not be evaluated.
    Indeterminate,
}

/// Result of evaluating an expression, with the cause when indeterminate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionResult {
    pub result: MatchOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<IndeterminateCause>,
}

impl ExpressionResult {
    pub fn matched() -> Self {
        Self { result: MatchOutcome::Match, cause: None }
    }

    pub fn not_matched() -> Self {
        Self { result: MatchOutcome::NoMatch, cause: None }
    }

    pub fn indeterminate(cause: IndeterminateCause) -> Self {
        Self { result: MatchOutcome::Indeterminate, cause: Some(cause) }
    }

    pub fn is_match(&self) -> bool {
        self.result == MatchOutcome::Match
    }

    pub fn is_no_match(&self) -> bool {
        self.result == MatchOutcome::NoMatch
    }

    pub fn is_indeterminate(&self) -> bool {
        self.result == MatchOutcome::Indeterminate
    }
}

/// Outcome of evaluating a rule, policy, or policy set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationOutcome {
    Permit,
    Deny,
    NotApplicable,
    /// Indeterminate without direction, produced by First-Applicable and
    /// Only-One-Applicable.
    Indeterminate,
    /// Indeterminate where only a deny remained possible.
    IndeterminateD,
    /// Indeterminate where only a permit remained possible.
    IndeterminateP,
    /// Indeterminate where both directions remained possible.
    IndeterminateDp,
}

impl EvaluationOutcome {
    pub fn is_indeterminate(self) -> bool {
        matches!(
            self,
            Self::Indeterminate | Self::IndeterminateD | Self::IndeterminateP | Self::IndeterminateDp
        )
    }
}

/// Result of evaluating a policy element, with the cause when indeterminate.
///
/// PERMIT, DENY, and NOT_APPLICABLE never carry a cause; the indeterminate
/// outcomes always do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub result: EvaluationOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<IndeterminateCause>,
}

impl EvaluationResult {
    pub fn permit() -> Self {
        Self::of(EvaluationOutcome::Permit)
    }

    pub fn deny() -> Self {
        Self::of(EvaluationOutcome::Deny)
    }

    pub fn not_applicable() -> Self {
        Self::of(EvaluationOutcome::NotApplicable)
    }

    /// A result with no cause. Used for the decisive outcomes.
    pub fn of(result: EvaluationOutcome) -> Self {
        Self { result, cause: None }
    }

    /// An indeterminate-family result carrying its cause.
    pub fn indeterminate(result: EvaluationOutcome, cause: IndeterminateCause) -> Self {
        debug_assert!(result.is_indeterminate());
        Self { result, cause: Some(cause) }
    }

    pub fn is_permit(&self) -> bool {
        self.result == EvaluationOutcome::Permit
    }

    pub fn is_deny(&self) -> bool {
        self.result == EvaluationOutcome::Deny
    }

    pub fn is_not_applicable(&self) -> bool {
        self.result == EvaluationOutcome::NotApplicable
    }

    pub fn is_indeterminate(&self) -> bool {
        self.result.is_indeterminate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_identifiers_are_stable() {
        assert_eq!(
            serde_json::to_value(EvaluationOutcome::NotApplicable).unwrap(),
            "NOT_APPLICABLE"
        );
        assert_eq!(
            serde_json::to_value(EvaluationOutcome::IndeterminateDp).unwrap(),
            "INDETERMINATE_DP"
        );
        assert_eq!(serde_json::to_value(MatchOutcome::NoMatch).unwrap(), "NO_MATCH");
    }

    #[test]
    fn indeterminate_family_membership() {
        assert!(EvaluationOutcome::Indeterminate.is_indeterminate());
        assert!(EvaluationOutcome::IndeterminateD.is_indeterminate());
        assert!(EvaluationOutcome::IndeterminateP.is_indeterminate());
        assert!(EvaluationOutcome::IndeterminateDp.is_indeterminate());
        assert!(!EvaluationOutcome::Permit.is_indeterminate());
        assert!(!EvaluationOutcome::NotApplicable.is_indeterminate());
    }
}
