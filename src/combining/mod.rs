//! Combining algorithms
//!
//! Six pure functions folding an ordered list of child outcomes into a
//! parent outcome. Children are evaluated in declaration order, and (except
//! for Only-One-Applicable, which gates on applicability alone) the full
//! list is evaluated before aggregation so that indeterminate causes are
//! collected completely.

mod deny_overrides;
mod deny_unless_permit;
mod first_applicable;
mod only_one_applicable;
mod permit_overrides;
mod permit_unless_deny;

use crate::context::EvaluationContext;
use crate::domain::{CombineAlgorithm, Expression};
use crate::errors::{AuthzError, Result};
use crate::evaluation::{
    evaluate_expression, CauseCode, EvaluationResult, ExpressionResult, IndeterminateCause,
};
use crate::predicate::PredicateEngine;

/// Common view of anything a combining algorithm folds: a rule under its
/// effective target, or a policy-tree node.
pub(crate) trait Principle {
    /// Whether this principle kind is a rule. Only-One-Applicable is
    /// undefined over rule lists and is rejected up front.
    const COMBINES_RULES: bool;

    fn id(&self) -> &str;

    /// Element label used in diagnostic cause descriptions.
    fn kind_label(&self) -> &'static str;

    fn target(&self) -> Option<&Expression>;

    fn evaluate(
        &self,
        predicates: &dyn PredicateEngine,
        ctx: &EvaluationContext<'_>,
    ) -> Result<EvaluationResult>;

    /// Whether the principle applies to the context, judged by its target
    /// alone. An indeterminate target cause gets the default target
    /// description attached.
    fn is_applicable(
        &self,
        predicates: &dyn PredicateEngine,
        ctx: &EvaluationContext<'_>,
    ) -> ExpressionResult {
        let Some(target) = self.target() else {
            return ExpressionResult::matched();
        };
        let mut result = evaluate_expression(predicates, ctx, target);
        if result.is_indeterminate() {
            if let Some(cause) = result.cause.as_mut() {
                cause.describe("Target", &target.id);
            }
        }
        result
    }
}

/// Applies the named combining algorithm to the children.
pub(crate) fn combine<P: Principle>(
    algorithm: CombineAlgorithm,
    predicates: &dyn PredicateEngine,
    ctx: &EvaluationContext<'_>,
    children: &[P],
) -> Result<EvaluationResult> {
    if P::COMBINES_RULES && algorithm == CombineAlgorithm::OnlyOneApplicable {
        return Err(AuthzError::RuleCombiningUnsupported { algorithm });
    }
    match algorithm {
        CombineAlgorithm::DenyOverrides => deny_overrides::evaluate(predicates, ctx, children),
        CombineAlgorithm::PermitOverrides => permit_overrides::evaluate(predicates, ctx, children),
        CombineAlgorithm::DenyUnlessPermit => {
            deny_unless_permit::evaluate(predicates, ctx, children)
        }
        CombineAlgorithm::PermitUnlessDeny => {
            permit_unless_deny::evaluate(predicates, ctx, children)
        }
        CombineAlgorithm::FirstApplicable => first_applicable::evaluate(predicates, ctx, children),
        CombineAlgorithm::OnlyOneApplicable => {
            only_one_applicable::evaluate(predicates, ctx, children)
        }
    }
}

/// Evaluates every child in declaration order.
fn evaluate_all<P: Principle>(
    predicates: &dyn PredicateEngine,
    ctx: &EvaluationContext<'_>,
    children: &[P],
) -> Result<Vec<EvaluationResult>> {
    children.iter().map(|child| child.evaluate(predicates, ctx)).collect()
}

/// Collects the causes of every indeterminate result, in evaluation order.
fn indeterminate_causes(results: &[EvaluationResult]) -> Vec<IndeterminateCause> {
    results
        .iter()
        .filter(|r| r.is_indeterminate())
        .filter_map(|r| r.cause.clone())
        .collect()
}

/// A processing-error cause whose children are every indeterminate cause
/// encountered, in evaluation order.
fn aggregate_cause(results: &[EvaluationResult]) -> IndeterminateCause {
    IndeterminateCause::new(CauseCode::ProcessingError)
        .with_sub_causes(indeterminate_causes(results))
}
