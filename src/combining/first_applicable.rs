//! First-Applicable combining algorithm
//!
//! Children are taken in declaration order; the first decisive or
//! indeterminate outcome wins, and a list with no applicable child is
//! NOT_APPLICABLE.
//!
//! When the winner is indeterminate, the returned cause aggregates the
//! indeterminate causes of *all* children, not only those preceding the
//! winner. A stricter reading would stop at the first; the wider collection
//! is kept deliberately because downstream tooling relies on seeing every
//! broken child in one place.

use crate::context::EvaluationContext;
use crate::errors::Result;
use crate::evaluation::{CauseCode, EvaluationOutcome, EvaluationResult, IndeterminateCause};
use crate::predicate::PredicateEngine;

use super::{evaluate_all, indeterminate_causes, Principle};

pub(super) fn evaluate<P: Principle>(
    predicates: &dyn PredicateEngine,
    ctx: &EvaluationContext<'_>,
    children: &[P],
) -> Result<EvaluationResult> {
    let results = evaluate_all(predicates, ctx, children)?;
    let causes = indeterminate_causes(&results);

    for result in results {
        if result.is_permit() || result.is_deny() {
            return Ok(EvaluationResult::of(result.result));
        }
        if result.is_indeterminate() {
            return Ok(EvaluationResult::indeterminate(
                EvaluationOutcome::Indeterminate,
                IndeterminateCause::new(CauseCode::ProcessingError).with_sub_causes(causes),
            ));
        }
    }
    Ok(EvaluationResult::not_applicable())
}

#[cfg(test)]
mod tests {
    use super::super::testing::{run, Scripted};
    use crate::domain::CombineAlgorithm;
    use crate::evaluation::EvaluationOutcome;

    #[test]
    fn first_decisive_child_wins() {
        let children = [
            Scripted::new("na", EvaluationOutcome::NotApplicable),
            Scripted::new("deny", EvaluationOutcome::Deny),
            Scripted::new("permit", EvaluationOutcome::Permit),
        ];
        let result = run(CombineAlgorithm::FirstApplicable, &children).unwrap();
        assert_eq!(result.result, EvaluationOutcome::Deny);
        assert!(result.cause.is_none());
    }

    #[test]
    fn indeterminate_child_stops_the_scan() {
        let children = [
            Scripted::new("broken", EvaluationOutcome::IndeterminateD),
            Scripted::new("permit", EvaluationOutcome::Permit),
        ];
        let result = run(CombineAlgorithm::FirstApplicable, &children).unwrap();
        assert_eq!(result.result, EvaluationOutcome::Indeterminate);
    }

    #[test]
    fn cause_collects_every_indeterminate_child() {
        // The losing indeterminate after the winner still shows up in the
        // cause tree.
        let children = [
            Scripted::new("first-broken", EvaluationOutcome::IndeterminateP),
            Scripted::new("second-broken", EvaluationOutcome::IndeterminateD),
        ];
        let result = run(CombineAlgorithm::FirstApplicable, &children).unwrap();

        let cause = result.cause.unwrap();
        assert_eq!(cause.sub_causes.len(), 2);
        assert_eq!(
            cause.sub_causes[1].description.as_deref(),
            Some("scripted failure in second-broken")
        );
    }

    #[test]
    fn no_applicable_children() {
        let children = [Scripted::new("na", EvaluationOutcome::NotApplicable)];
        let result = run(CombineAlgorithm::FirstApplicable, &children).unwrap();
        assert_eq!(result.result, EvaluationOutcome::NotApplicable);
    }
}
