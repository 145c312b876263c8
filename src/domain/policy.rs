//! Policy and policy-set elements

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Expression, Rule};

// ============================================================================
// Policy
// ============================================================================

/// A policy: an ordered list of rules combined under one algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Identifier of the policy, used in diagnostic cause descriptions.
    pub id: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Applicability gate for the whole policy. Rules without their own
    /// target inherit this one.
    pub target: Expression,
    /// Algorithm combining the rule outcomes.
    #[serde(rename = "combineAlgorithmName")]
    pub combine_algorithm: CombineAlgorithm,
    /// Whether this element is the root of the policy tree it was loaded
    /// from. Informational; evaluation starts wherever the request points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_root: Option<bool>,
    /// The rules, in declaration order.
    pub rules: Vec<Rule>,
}

// ============================================================================
// PolicySet
// ============================================================================

/// A policy set: an ordered list of policies or nested policy sets combined
/// under one algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySet {
    /// Identifier of the policy set, used in diagnostic cause descriptions.
    pub id: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Applicability gate for the whole set.
    pub target: Expression,
    /// Algorithm combining the child outcomes.
    #[serde(rename = "combineAlgorithmName")]
    pub combine_algorithm: CombineAlgorithm,
    /// Whether this element is the root of the policy tree it was loaded
    /// from. Informational; evaluation starts wherever the request points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_root: Option<bool>,
    /// The children, in declaration order.
    pub policies: Vec<PolicyNode>,
}

// ============================================================================
// PolicyNode
// ============================================================================

/// A node of the policy tree: either a policy or a nested policy set.
///
/// Documents are discriminated by field presence (a node carrying `rules`
/// is a policy, one carrying `policies` is a policy set), so no explicit
/// type tag is needed on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicyNode {
    Policy(Policy),
    PolicySet(PolicySet),
}

impl PolicyNode {
    pub fn id(&self) -> &str {
        match self {
            Self::Policy(p) => &p.id,
            Self::PolicySet(s) => &s.id,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Policy(p) => p.description.as_deref(),
            Self::PolicySet(s) => s.description.as_deref(),
        }
    }

    pub fn target(&self) -> &Expression {
        match self {
            Self::Policy(p) => &p.target,
            Self::PolicySet(s) => &s.target,
        }
    }

    pub fn combine_algorithm(&self) -> CombineAlgorithm {
        match self {
            Self::Policy(p) => p.combine_algorithm,
            Self::PolicySet(s) => s.combine_algorithm,
        }
    }

    /// Element label used in diagnostic cause descriptions.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Policy(_) => "Policy",
            Self::PolicySet(_) => "PolicySet",
        }
    }
}

// ============================================================================
// CombineAlgorithm
// ============================================================================

/// The six combining algorithms.
///
/// The identifiers below are part of the stable document contract and
/// round-trip verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombineAlgorithm {
    /// Deny takes precedence over every other outcome.
    DenyOverrides,
    /// Permit takes precedence over every other outcome.
    PermitOverrides,
    /// Deny unless some child permits.
    DenyUnlessPermit,
    /// Permit unless some child denies.
    PermitUnlessDeny,
    /// The first applicable child decides.
    FirstApplicable,
    /// Exactly one child may be applicable; more is an error. Only defined
    /// for policy-set children.
    OnlyOneApplicable,
}

impl fmt::Display for CombineAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DenyOverrides => "DENY_OVERRIDES",
            Self::PermitOverrides => "PERMIT_OVERRIDES",
            Self::DenyUnlessPermit => "DENY_UNLESS_PERMIT",
            Self::PermitUnlessDeny => "PERMIT_UNLESS_DENY",
            Self::FirstApplicable => "FIRST_APPLICABLE",
            Self::OnlyOneApplicable => "ONLY_ONE_APPLICABLE",
        };
        f.write_str(name)
    }
}
