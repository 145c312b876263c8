//! Permit-Overrides combining algorithm
//!
//! The mirror image of Deny-Overrides: a single permit settles the
//! combination, a permit-direction indeterminate next to any deny
//! possibility widens to INDETERMINATE_DP.

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

    let mut any_deny = false;
    let mut any_ind_d = false;
    let mut any_ind_p = false;
    let mut any_ind_dp = false;

    for result in &results {
        if result.is_permit() {
            return Ok(EvaluationResult::permit());
        }
        match result.result {
            EvaluationOutcome::Deny => any_deny = true,
            EvaluationOutcome::IndeterminateD => any_ind_d = true,
            EvaluationOutcome::IndeterminateP => any_ind_p = true,
            EvaluationOutcome::IndeterminateDp => any_ind_dp = true,
            _ => {}
        }
    }

    if any_ind_dp || (any_ind_p && (any_ind_d || any_deny)) {
        let cause = aggregate_cause(&results);
        return Ok(EvaluationResult::indeterminate(EvaluationOutcome::IndeterminateDp, cause));
    }
    if any_ind_p {
        let cause = aggregate_cause(&results);
        return Ok(EvaluationResult::indeterminate(EvaluationOutcome::IndeterminateP, cause));
    }
    if any_deny {
        return Ok(EvaluationResult::deny());
    }
    if any_ind_d {
        let cause = aggregate_cause(&results);
        return Ok(EvaluationResult::indeterminate(EvaluationOutcome::IndeterminateD, cause));
    }
    Ok(EvaluationResult::not_applicable())
}

#[cfg(test)]
mod tests {
    use super::super::testing::{run, Scripted};
    use crate::domain::CombineAlgorithm;
    use crate::evaluation::EvaluationOutcome;

    fn outcome(children: &[Scripted]) -> EvaluationOutcome {
        run(CombineAlgorithm::PermitOverrides, children).unwrap().result
    }

    #[test]
    fn permit_beats_everything() {
        let children = [
            Scripted::new("deny", EvaluationOutcome::Deny),
            Scripted::new("broken", EvaluationOutcome::IndeterminateDp),
            Scripted::new("permit", EvaluationOutcome::Permit),
        ];
        assert_eq!(outcome(&children), EvaluationOutcome::Permit);
    }

    #[test]
    fn possible_permit_next_to_deny_widens() {
        let children = [
            Scripted::new("ind-p", EvaluationOutcome::IndeterminateP),
            Scripted::new("deny", EvaluationOutcome::Deny),
        ];
        assert_eq!(outcome(&children), EvaluationOutcome::IndeterminateDp);
    }

    #[test]
    fn permit_direction_indeterminate_wins_when_alone() {
        let children = [
            Scripted::new("na", EvaluationOutcome::NotApplicable),
            Scripted::new("ind-p", EvaluationOutcome::IndeterminateP),
        ];
        assert_eq!(outcome(&children), EvaluationOutcome::IndeterminateP);
    }

    #[test]
    fn deny_beats_deny_direction_indeterminate() {
        let children = [
            Scripted::new("ind-d", EvaluationOutcome::IndeterminateD),
            Scripted::new("deny", EvaluationOutcome::Deny),
        ];
        assert_eq!(outcome(&children), EvaluationOutcome::Deny);
    }

    #[test]
    fn all_inapplicable() {
        let children = [Scripted::new("na", EvaluationOutcome::NotApplicable)];
        assert_eq!(outcome(&children), EvaluationOutcome::NotApplicable);
    }
}
