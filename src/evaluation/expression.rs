//! Expression evaluator
//!
//! Three-valued evaluation of target and condition expressions. Composite
//! expressions evaluate every child before collapsing, so indeterminate
//! provenance is complete and cause order follows declaration order.

use crate::context::EvaluationContext;
use crate::domain::{CombinationType, Expression, ExpressionKind};
use crate::predicate::PredicateEngine;

use super::cause::{CauseCode, IndeterminateCause};
use super::result::ExpressionResult;

/// Evaluates an expression against the context.
pub fn evaluate(
    predicates: &dyn PredicateEngine,
    ctx: &EvaluationContext<'_>,
    expression: &Expression,
) -> ExpressionResult {
    match &expression.kind {
        ExpressionKind::Literal { expression: body } => {
            evaluate_literal(predicates, ctx, body.as_deref())
        }
        ExpressionKind::Composition { combination_type, sub_expressions } => {
            evaluate_composition(predicates, ctx, *combination_type, sub_expressions.as_deref())
        }
    }
}

fn evaluate_literal(
    predicates: &dyn PredicateEngine,
    ctx: &EvaluationContext<'_>,
    body: Option<&str>,
) -> ExpressionResult {
    let Some(source) = body else {
        return ExpressionResult::indeterminate(
            IndeterminateCause::new(CauseCode::SyntaxError).with_description("Expression is null"),
        );
    };
    match predicates.evaluate(ctx, source) {
        Ok(true) => ExpressionResult::matched(),
        Ok(false) => ExpressionResult::not_matched(),
        Err(error) => ExpressionResult::indeterminate(
            IndeterminateCause::new(error.code)
                .with_description(error.message)
                .with_content(source),
        ),
    }
}

fn evaluate_composition(
    predicates: &dyn PredicateEngine,
    ctx: &EvaluationContext<'_>,
    combination_type: CombinationType,
    children: Option<&[Expression]>,
) -> ExpressionResult {
    let children = match children {
        Some(children) if !children.is_empty() => children,
        _ => {
            return ExpressionResult::indeterminate(
                IndeterminateCause::new(CauseCode::SyntaxError)
                    .with_description("Sub expression is empty"),
            )
        }
    };

    // Every child is evaluated, even after the result is already decided:
    // collapsing early would drop indeterminate causes from later children.
    let results: Vec<ExpressionResult> =
        children.iter().map(|child| evaluate(predicates, ctx, child)).collect();

    let decided = match combination_type {
        CombinationType::And => results.iter().any(ExpressionResult::is_no_match).then(ExpressionResult::not_matched),
        CombinationType::Or => results.iter().any(ExpressionResult::is_match).then(ExpressionResult::matched),
    };
    if let Some(result) = decided {
        return result;
    }

    let causes: Vec<IndeterminateCause> = results
        .into_iter()
        .filter(|r| r.is_indeterminate())
        .filter_map(|r| r.cause)
        .collect();
    if !causes.is_empty() {
        return ExpressionResult::indeterminate(
            IndeterminateCause::new(CauseCode::ProcessingError).with_sub_causes(causes),
        );
    }

    match combination_type {
        CombinationType::And => ExpressionResult::matched(),
        CombinationType::Or => ExpressionResult::not_matched(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Action, Environment, Resource, Subject};
    use crate::predicate::PredicateError;

    /// Mock language: "T" matches, "F" does not, anything else fails.
    fn mock(ctx: &EvaluationContext<'_>, source: &str) -> Result<bool, PredicateError> {
        let _ = ctx;
        match source {
            "T" => Ok(true),
            "F" => Ok(false),
            other => Err(PredicateError::syntax(format!("bad token '{other}'"))),
        }
    }

    struct Fixture {
        subject: Subject,
        object: Resource,
        action: Action,
        environment: Environment,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                subject: Subject::new("u1"),
                object: Resource::new("r"),
                action: Action::new(),
                environment: Environment::new(),
            }
        }

        fn ctx(&self) -> EvaluationContext<'_> {
            EvaluationContext::new(&self.subject, &self.object, &self.action, &self.environment)
        }
    }

    fn eval(expression: &Expression) -> ExpressionResult {
        let f = Fixture::new();
        evaluate(&mock, &f.ctx(), expression)
    }

    #[test]
    fn literal_outcomes() {
        assert!(eval(&Expression::literal("e", "T")).is_match());
        assert!(eval(&Expression::literal("e", "F")).is_no_match());

        let broken = eval(&Expression::literal("e", "?"));
        assert!(broken.is_indeterminate());
        let cause = broken.cause.unwrap();
        assert_eq!(cause.code, CauseCode::SyntaxError);
        assert_eq!(cause.content.as_deref(), Some("?"));
    }

    #[test]
    fn absent_literal_body() {
        let expr = Expression {
            id: "e".into(),
            description: None,
            kind: ExpressionKind::Literal { expression: None },
        };
        let result = eval(&expr);
        assert!(result.is_indeterminate());
        let cause = result.cause.unwrap();
        assert_eq!(cause.code, CauseCode::SyntaxError);
        assert_eq!(cause.description.as_deref(), Some("Expression is null"));
    }

    #[test]
    fn empty_composition() {
        for children in [None, Some(vec![])] {
            let expr = Expression {
                id: "e".into(),
                description: None,
                kind: ExpressionKind::Composition {
                    combination_type: CombinationType::And,
                    sub_expressions: children,
                },
            };
            let result = eval(&expr);
            assert!(result.is_indeterminate());
            let cause = result.cause.unwrap();
            assert_eq!(cause.code, CauseCode::SyntaxError);
            assert_eq!(cause.description.as_deref(), Some("Sub expression is empty"));
        }
    }

    #[test]
    fn conjunction_truth_table() {
        let t = || Expression::literal("t", "T");
        let f = || Expression::literal("f", "F");
        let bad = || Expression::literal("bad", "?");

        assert!(eval(&Expression::all_of("and", vec![t(), t()])).is_match());
        assert!(eval(&Expression::all_of("and", vec![t(), f()])).is_no_match());
        // NO_MATCH wins over INDETERMINATE in a conjunction.
        assert!(eval(&Expression::all_of("and", vec![bad(), f()])).is_no_match());
        assert!(eval(&Expression::all_of("and", vec![t(), bad()])).is_indeterminate());
    }

    #[test]
    fn disjunction_truth_table() {
        let t = || Expression::literal("t", "T");
        let f = || Expression::literal("f", "F");
        let bad = || Expression::literal("bad", "?");

        assert!(eval(&Expression::any_of("or", vec![f(), t()])).is_match());
        assert!(eval(&Expression::any_of("or", vec![f(), f()])).is_no_match());
        // MATCH wins over INDETERMINATE in a disjunction.
        assert!(eval(&Expression::any_of("or", vec![bad(), t()])).is_match());
        assert!(eval(&Expression::any_of("or", vec![f(), bad()])).is_indeterminate());
    }

    #[test]
    fn indeterminate_causes_keep_declaration_order() {
        let expr = Expression::all_of(
            "and",
            vec![
                Expression::literal("first", "x"),
                Expression::literal("mid", "T"),
                Expression::literal("second", "y"),
            ],
        );
        let result = eval(&expr);
        let cause = result.cause.unwrap();

        assert_eq!(cause.code, CauseCode::ProcessingError);
        assert_eq!(cause.sub_causes.len(), 2);
        assert_eq!(cause.sub_causes[0].content.as_deref(), Some("x"));
        assert_eq!(cause.sub_causes[1].content.as_deref(), Some("y"));
    }

    #[test]
    fn nested_composition() {
        let expr = Expression::any_of(
            "or",
            vec![
                Expression::all_of(
                    "and",
                    vec![Expression::literal("a", "T"), Expression::literal("b", "F")],
                ),
                Expression::literal("c", "T"),
            ],
        );
        assert!(eval(&expr).is_match());
    }
}
