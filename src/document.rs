//! Policy document loading
//!
//! Policies travel as JSON: a tree discriminated by field presence (`rules`
//! for a policy, `policies` for a policy set), camelCase keys, and the
//! algorithm/strategy identifiers verbatim. Deserialization is plain serde;
//! this module adds the structural checks serde cannot express, so that a
//! broken document fails at load time instead of surfacing as a puzzling
//! evaluation outcome.

use crate::domain::{CombineAlgorithm, Expression, ExpressionKind, PolicyNode, Rule};
use crate::errors::{AuthzError, Result};

/// Parses and validates a policy document.
///
/// # Errors
/// Returns an error when the JSON does not match the schema or when the
/// tree violates a structural constraint (see [`validate`]).
pub fn from_json_str(json: &str) -> Result<PolicyNode> {
    let node: PolicyNode = serde_json::from_str(json)?;
    validate(&node)?;
    Ok(node)
}

/// Serializes a policy tree back to its document form.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn to_json_string(node: &PolicyNode) -> Result<String> {
    Ok(serde_json::to_string_pretty(node)?)
}

/// Structural validation of a parsed policy tree:
///
/// * every element carries a non-empty id;
/// * Only-One-Applicable appears only on policy sets;
/// * composite expressions declare at least one sub-expression.
///
/// # Errors
/// Returns the first violation found, in document order.
pub fn validate(node: &PolicyNode) -> Result<()> {
    validate_id(node.id(), node.kind_label())?;
    validate_expression(node.target())?;
    match node {
        PolicyNode::Policy(policy) => {
            if policy.combine_algorithm == CombineAlgorithm::OnlyOneApplicable {
                return Err(AuthzError::RuleCombiningUnsupported {
                    algorithm: policy.combine_algorithm,
                });
            }
            for rule in &policy.rules {
                validate_rule(rule)?;
            }
        }
        PolicyNode::PolicySet(set) => {
            for child in &set.policies {
                validate(child)?;
            }
        }
    }
    Ok(())
}

fn validate_rule(rule: &Rule) -> Result<()> {
    validate_id(&rule.id, "Rule")?;
    if let Some(target) = &rule.target {
        validate_expression(target)?;
    }
    if let Some(condition) = &rule.condition {
        validate_expression(condition)?;
    }
    Ok(())
}

fn validate_expression(expression: &Expression) -> Result<()> {
    validate_id(&expression.id, "Expression")?;
    if let ExpressionKind::Composition { sub_expressions, .. } = &expression.kind {
        let children = sub_expressions.as_deref().unwrap_or_default();
        if children.is_empty() {
            return Err(AuthzError::MalformedPolicy {
                reason: format!("expression {} is a composition with no sub-expressions", expression.id),
            });
        }
        for child in children {
            validate_expression(child)?;
        }
    }
    Ok(())
}

fn validate_id(id: &str, element: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(AuthzError::MalformedPolicy { reason: format!("{element} with empty id") });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "id": "root",
        "description": "service root",
        "target": {"id": "root-target", "type": "LITERAL", "expression": "object.name == 'note'"},
        "combineAlgorithmName": "FIRST_APPLICABLE",
        "isRoot": true,
        "policies": [
            {
                "id": "admin",
                "target": {
                    "id": "admin-target",
                    "type": "COMPOSITION",
                    "combinationType": "OR",
                    "subExpressions": [
                        {"id": "is-admin", "type": "LITERAL", "expression": "subject.roles contains 'ADMIN'"},
                        {"id": "is-auditor", "type": "LITERAL", "expression": "subject.roles contains 'AUDITOR'"}
                    ]
                },
                "combineAlgorithmName": "PERMIT_UNLESS_DENY",
                "rules": [
                    {"id": "admin-all", "effect": "PERMIT"}
                ]
            }
        ]
    }"#;

    #[test]
    fn load_and_reserialize_round_trips() {
        let tree = from_json_str(DOCUMENT).unwrap();
        let json = to_json_string(&tree).unwrap();
        let again = from_json_str(&json).unwrap();
        assert_eq!(again, tree);
    }

    #[test]
    fn only_one_applicable_on_a_policy_is_rejected() {
        let json = r#"{
            "id": "p",
            "target": {"id": "t", "type": "LITERAL", "expression": "true"},
            "combineAlgorithmName": "ONLY_ONE_APPLICABLE",
            "rules": []
        }"#;
        let error = from_json_str(json).unwrap_err();
        assert!(matches!(error, AuthzError::RuleCombiningUnsupported { .. }));
    }

    #[test]
    fn empty_composition_is_rejected_at_load() {
        let json = r#"{
            "id": "p",
            "target": {"id": "t", "type": "COMPOSITION", "combinationType": "AND", "subExpressions": []},
            "combineAlgorithmName": "DENY_OVERRIDES",
            "rules": []
        }"#;
        let error = from_json_str(json).unwrap_err();
        assert!(matches!(error, AuthzError::MalformedPolicy { .. }));
    }

    #[test]
    fn empty_ids_are_rejected() {
        let json = r#"{
            "id": " ",
            "target": {"id": "t", "type": "LITERAL", "expression": "true"},
            "combineAlgorithmName": "DENY_OVERRIDES",
            "rules": []
        }"#;
        let error = from_json_str(json).unwrap_err();
        assert!(matches!(error, AuthzError::MalformedPolicy { .. }));
    }

    #[test]
    fn unknown_algorithm_identifiers_fail_to_parse() {
        let json = r#"{
            "id": "p",
            "target": {"id": "t", "type": "LITERAL", "expression": "true"},
            "combineAlgorithmName": "MAJORITY_VOTE",
            "rules": []
        }"#;
        assert!(matches!(from_json_str(json), Err(AuthzError::Json(_))));
    }
}
