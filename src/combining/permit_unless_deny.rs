//! Permit-Unless-Deny combining algorithm
//!
//! Deny iff some child denies, permit otherwise. Indeterminate and
//! inapplicable children collapse into the permit default, so this
//! algorithm never produces an indeterminate outcome.

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
    Ok(if results.iter().any(EvaluationResult::is_deny) {
        EvaluationResult::deny()
    } else {
        EvaluationResult::permit()
    })
}

#[cfg(test)]
mod tests {
    use super::super::testing::{run, Scripted};
    use crate::domain::CombineAlgorithm;
    use crate::evaluation::EvaluationOutcome;

    fn outcome(children: &[Scripted]) -> EvaluationOutcome {
        run(CombineAlgorithm::PermitUnlessDeny, children).unwrap().result
    }

    #[test]
    fn any_deny_wins() {
        let children = [
            Scripted::new("permit", EvaluationOutcome::Permit),
            Scripted::new("deny", EvaluationOutcome::Deny),
        ];
        assert_eq!(outcome(&children), EvaluationOutcome::Deny);
    }

    #[test]
    fn indeterminates_collapse_to_permit() {
        let children = [
            Scripted::new("ind-d", EvaluationOutcome::IndeterminateD),
            Scripted::new("na", EvaluationOutcome::NotApplicable),
        ];
        let result = run(CombineAlgorithm::PermitUnlessDeny, &children).unwrap();
        assert_eq!(result.result, EvaluationOutcome::Permit);
        assert!(result.cause.is_none());
    }
}
