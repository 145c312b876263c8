//! Deny-Unless-Permit combining algorithm
//!
//! Permit iff some child permits, deny otherwise. Indeterminate and
//! inapplicable children collapse into the deny default, so this algorithm
//! never produces an indeterminate outcome.

use crate::context::EvaluationContext;
use crate::errors::Result;
use crate::evaluation::EvaluationResult;
use crate::predicate::PredicateEngine;

use super::{evaluate_all, Principle};

pub(super) fn evaluate<P: Principle>(
    predicates: &dyn PredicateEngine,
    ctx: &EvaluationContext<'_>,
    children: &[P],
) -> Result<EvaluationResult> {
    let results = evaluate_all(predicates, ctx, children)?;
    Ok(if results.iter().any(EvaluationResult::is_permit) {
        EvaluationResult::permit()
    } else {
        EvaluationResult::deny()
    })
}
