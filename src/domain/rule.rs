//! Rule element

use serde::{Deserialize, Serialize};

use super::Expression;

/// The smallest evaluable unit of a policy.
///
/// A rule applies when its target and condition both match; the effect then
/// decides between permit and deny. A rule without a target inherits the
/// enclosing policy's target at evaluation time; a rule without a condition
/// is treated as if the condition matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Identifier of the rule, used in diagnostic cause descriptions.
    pub id: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Applicability gate; absent means inherited from the enclosing policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Expression>,
    /// Final predicate gate; absent means always satisfied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Expression>,
    /// Decision this rule contributes when it applies.
    pub effect: Effect,
}

impl Rule {
    pub fn new(id: impl Into<String>, effect: Effect) -> Self {
        Self { id: id.into(), description: None, target: None, condition: None, effect }
    }

    pub fn with_target(mut self, target: Expression) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_condition(mut self, condition: Expression) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// Decision effect of an applicable rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    /// Grants the request.
    Permit,
    /// Denies the request.
    Deny,
}
