//! Predicate expression tree
//!
//! Targets and conditions are expressions: the leaves are literal predicate
//! strings evaluated by the injected predicate engine, the interior nodes
//! combine children with AND/OR. The wire shape stays flat
//! (`{type, expression?, subExpressions?, combinationType?}`) so existing
//! policy documents load unchanged.

use serde::{Deserialize, Serialize};

/// A target or condition predicate: a literal leaf or an AND/OR composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expression {
    /// Identifier of the expression, used in diagnostic cause descriptions.
    pub id: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Literal body or composition, discriminated by the `type` field.
    #[serde(flatten)]
    pub kind: ExpressionKind,
}

/// The two expression shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExpressionKind {
    /// A predicate string evaluated against the context by the predicate
    /// engine. An absent body is diagnosed at evaluation time, not load time.
    #[serde(rename = "LITERAL", rename_all = "camelCase")]
    Literal {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expression: Option<String>,
    },
    /// A combination of sub-expressions under AND or OR.
    #[serde(rename = "COMPOSITION", rename_all = "camelCase")]
    Composition {
        combination_type: CombinationType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sub_expressions: Option<Vec<Expression>>,
    },
}

/// Logical connective for composite expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombinationType {
    /// Every sub-expression must match.
    And,
    /// At least one sub-expression must match.
    Or,
}

impl Expression {
    /// A literal leaf with the given predicate source.
    pub fn literal(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            kind: ExpressionKind::Literal { expression: Some(source.into()) },
        }
    }

    /// An AND composition over the given children.
    pub fn all_of(id: impl Into<String>, children: Vec<Expression>) -> Self {
        Self::composition(id, CombinationType::And, children)
    }

    /// An OR composition over the given children.
    pub fn any_of(id: impl Into<String>, children: Vec<Expression>) -> Self {
        Self::composition(id, CombinationType::Or, children)
    }

    fn composition(id: impl Into<String>, combination_type: CombinationType, children: Vec<Expression>) -> Self {
        Self {
            id: id.into(),
            description: None,
            kind: ExpressionKind::Composition {
                combination_type,
                sub_expressions: Some(children),
            },
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, ExpressionKind::Literal { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape_is_flat() {
        let expr = Expression::literal("e1", "subject.user_id == 'u1'");
        let json = serde_json::to_value(&expr).unwrap();

        assert_eq!(json["type"], "LITERAL");
        assert_eq!(json["expression"], "subject.user_id == 'u1'");
        assert!(json.get("subExpressions").is_none());
    }

    #[test]
    fn composition_deserializes_with_camel_case_fields() {
        let json = r#"{
            "id": "e2",
            "type": "COMPOSITION",
            "combinationType": "OR",
            "subExpressions": [
                {"id": "e2a", "type": "LITERAL", "expression": "subject.roles contains 'ADMIN'"}
            ]
        }"#;
        let expr: Expression = serde_json::from_str(json).unwrap();

        match expr.kind {
            ExpressionKind::Composition { combination_type, sub_expressions } => {
                assert_eq!(combination_type, CombinationType::Or);
                assert_eq!(sub_expressions.unwrap().len(), 1);
            }
            ExpressionKind::Literal { .. } => panic!("expected composition"),
        }
    }

    #[test]
    fn literal_body_may_be_absent() {
        let json = r#"{"id": "e3", "type": "LITERAL"}"#;
        let expr: Expression = serde_json::from_str(json).unwrap();

        assert_eq!(expr.kind, ExpressionKind::Literal { expression: None });
    }
}
