//! Only-One-Applicable combining algorithm
//!
//! Defined for policy-set children only. Applicability is judged per child
//! from its target alone; exactly one applicable child may exist, and only
//! that child is fully evaluated. A second applicable child, or a child
//! whose applicability cannot be determined, makes the whole combination
//! indeterminate with a cause naming the offending child.

use crate::context::EvaluationContext;
use crate::errors::Result;
use crate::evaluation::{
    CauseCode, EvaluationOutcome, EvaluationResult, IndeterminateCause,
};
use crate::predicate::PredicateEngine;

use super::Principle;

pub(super) fn evaluate<P: Principle>(
    predicates: &dyn PredicateEngine,
    ctx: &EvaluationContext<'_>,
    children: &[P],
) -> Result<EvaluationResult> {
    let mut selected: Option<&P> = None;

    for child in children {
        let applicable = child.is_applicable(predicates, ctx);
        if applicable.is_indeterminate() {
            return Ok(ambiguity(child, applicable.cause));
        }
        if applicable.is_match() {
            if selected.is_some() {
                return Ok(ambiguity(child, None));
            }
            selected = Some(child);
        }
    }

    match selected {
        Some(child) => child.evaluate(predicates, ctx),
        None => Ok(EvaluationResult::not_applicable()),
    }
}

/// An indeterminate outcome naming the child that broke the
/// exactly-one-applicable contract.
///
/// The child reference goes into a sub-cause: the enclosing element
/// boundary overwrites the top-level description with its own id, and the
/// offending child must stay visible underneath it.
fn ambiguity<P: Principle>(child: &P, sub_cause: Option<IndeterminateCause>) -> EvaluationResult {
    let mut child_cause = IndeterminateCause::new(CauseCode::ProcessingError)
        .with_sub_causes(sub_cause.into_iter().collect());
    child_cause.describe(child.kind_label(), child.id());

    let cause =
        IndeterminateCause::new(CauseCode::ProcessingError).with_sub_causes(vec![child_cause]);
    EvaluationResult::indeterminate(EvaluationOutcome::Indeterminate, cause)
}
