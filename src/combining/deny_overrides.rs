//! Deny-Overrides combining algorithm
//!
//! A single deny settles the combination. Without one, indeterminate
//! children degrade the outcome: a deny-direction indeterminate next to any
//! permit possibility widens to INDETERMINATE_DP, otherwise the strongest
//! remaining signal wins, and a list with no applicable child is
//! NOT_APPLICABLE.

use crate::context::EvaluationContext;
use crate::errors::Result;
use crate::evaluation::{EvaluationOutcome, EvaluationResult};
use crate::predicate::PredicateEngine;

use super::{aggregate_cause, evaluate_all, Principle};

pub(super) fn evaluate<P: Principle>(
    predicates: &dyn PredicateEngine,
    ctx: &EvaluationContext<'_>,
    children: &[P],
) -> Result<EvaluationResult> {
    let results = evaluate_all(predicates, ctx, children)?;

    let mut any_permit = false;
    let mut any_ind_d = false;
    let mut any_ind_p = false;
    let mut any_ind_dp = false;

    for result in &results {
        if result.is_deny() {
            return Ok(EvaluationResult::deny());
        }
        match result.result {
            EvaluationOutcome::Permit => any_permit = true,
            EvaluationOutcome::IndeterminateD => any_ind_d = true,
            EvaluationOutcome::IndeterminateP => any_ind_p = true,
            EvaluationOutcome::IndeterminateDp => any_ind_dp = true,
            _ => {}
        }
    }

    if any_ind_dp || (any_ind_d && (any_ind_p || any_permit)) {
        let cause = aggregate_cause(&results);
        return Ok(EvaluationResult::indeterminate(EvaluationOutcome::IndeterminateDp, cause));
    }
    if any_ind_d {
        let cause = aggregate_cause(&results);
        return Ok(EvaluationResult::indeterminate(EvaluationOutcome::IndeterminateD, cause));
    }
    if any_permit {
        return Ok(EvaluationResult::permit());
    }
    if any_ind_p {
        let cause = aggregate_cause(&results);
        return Ok(EvaluationResult::indeterminate(EvaluationOutcome::IndeterminateP, cause));
    }
    Ok(EvaluationResult::not_applicable())
}
