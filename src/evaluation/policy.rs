//! Rule, policy, and policy-set evaluators
//!
//! A rule reduces to one of six outcomes from its target and condition. A
//! policy (set) first gates on its target, then folds its children through
//! the configured combining algorithm, enriching or promoting indeterminate
//! outcomes as the target result demands.

use tracing::debug;

use crate::combining::{self, Principle};
use crate::context::EvaluationContext;
use crate::domain::{Effect, Expression, Policy, PolicyNode, Rule};
use crate::errors::Result;
use crate::predicate::PredicateEngine;

use super::cause::{CauseCode, IndeterminateCause};
use super::expression;
use super::result::{EvaluationOutcome, EvaluationResult, ExpressionResult};

/// A rule together with the target it inherits from its enclosing policy.
///
/// Rules without a target use the policy's target; the shared policy tree is
/// never rewritten to make that happen. This view carries the inherited
/// reference instead.
#[derive(Debug, Clone, Copy)]
pub struct EffectiveRule<'a> {
    rule: &'a Rule,
    inherited_target: Option<&'a Expression>,
}

impl<'a> EffectiveRule<'a> {
    pub fn new(rule: &'a Rule, inherited_target: Option<&'a Expression>) -> Self {
        Self { rule, inherited_target }
    }

    pub fn rule(&self) -> &'a Rule {
        self.rule
    }

    /// The target in effect: the rule's own, or the inherited one.
    pub fn target(&self) -> Option<&'a Expression> {
        self.rule.target.as_ref().or(self.inherited_target)
    }
}

/// Materializes the effective-rule view of a policy's rule list.
pub fn effective_rules(policy: &Policy) -> Vec<EffectiveRule<'_>> {
    policy.rules.iter().map(|rule| EffectiveRule::new(rule, Some(&policy.target))).collect()
}

/// Evaluates a standalone rule (no inherited target).
pub fn evaluate_rule(
    predicates: &dyn PredicateEngine,
    ctx: &EvaluationContext<'_>,
    rule: &Rule,
) -> EvaluationResult {
    evaluate_effective_rule(predicates, ctx, &EffectiveRule::new(rule, None))
}

/// Evaluates a rule under its effective target.
pub fn evaluate_effective_rule(
    predicates: &dyn PredicateEngine,
    ctx: &EvaluationContext<'_>,
    rule: &EffectiveRule<'_>,
) -> EvaluationResult {
    let target = match rule.target() {
        Some(target) => expression::evaluate(predicates, ctx, target),
        None => ExpressionResult::matched(),
    };
    let condition = match &rule.rule().condition {
        Some(condition) => expression::evaluate(predicates, ctx, condition),
        None => ExpressionResult::matched(),
    };

    if target.is_match() {
        if condition.is_match() {
            return match rule.rule().effect {
                Effect::Permit => EvaluationResult::permit(),
                Effect::Deny => EvaluationResult::deny(),
            };
        }
        if condition.is_no_match() {
            return EvaluationResult::not_applicable();
        }
        let id = rule.rule().condition.as_ref().map(|c| c.id.as_str()).unwrap_or_default();
        indeterminate_rule(rule.rule(), condition, "Condition", id)
    } else if target.is_no_match() {
        EvaluationResult::not_applicable()
    } else {
        let id = rule.target().map(|t| t.id.as_str()).unwrap_or_default();
        indeterminate_rule(rule.rule(), target, "Target", id)
    }
}

/// Builds the indeterminate outcome of a rule whose target or condition
/// could not be evaluated. The direction follows the rule's effect.
fn indeterminate_rule(
    rule: &Rule,
    expression_result: ExpressionResult,
    element: &str,
    expression_id: &str,
) -> EvaluationResult {
    let mut sub_cause = expression_result
        .cause
        .unwrap_or_else(|| IndeterminateCause::new(CauseCode::ProcessingError));
    sub_cause.describe(element, expression_id);

    let mut cause = IndeterminateCause::new(CauseCode::ProcessingError);
    cause.describe("Rule", &rule.id);
    cause.sub_causes = vec![sub_cause];

    let outcome = match rule.effect {
        Effect::Permit => EvaluationOutcome::IndeterminateP,
        Effect::Deny => EvaluationOutcome::IndeterminateD,
    };
    EvaluationResult::indeterminate(outcome, cause)
}

/// Evaluates a policy or policy set.
///
/// The only error channel is configuration misuse (a rule-level combining
/// request for an algorithm defined on policies only); every evaluation-time
/// anomaly comes back as an indeterminate result.
pub fn evaluate_node(
    predicates: &dyn PredicateEngine,
    ctx: &EvaluationContext<'_>,
    node: &PolicyNode,
) -> Result<EvaluationResult> {
    debug!(id = node.id(), kind = node.kind_label(), "evaluating policy element");

    let target = expression::evaluate(predicates, ctx, node.target());
    if target.is_no_match() {
        return Ok(EvaluationResult::not_applicable());
    }

    let combine_result = match node {
        PolicyNode::Policy(policy) => {
            let rules = effective_rules(policy);
            combining::combine(policy.combine_algorithm, predicates, ctx, &rules)?
        }
        PolicyNode::PolicySet(set) => {
            combining::combine(set.combine_algorithm, predicates, ctx, &set.policies)?
        }
    };

    if target.is_match() {
        let mut combine_result = combine_result;
        if combine_result.is_indeterminate() {
            if let Some(cause) = combine_result.cause.as_mut() {
                cause.describe(node.kind_label(), node.id());
            }
        }
        return Ok(combine_result);
    }

    Ok(promote_for_indeterminate_target(combine_result, node, target))
}

/// Promotion of a combined result when the element's own target was
/// indeterminate: decisive outcomes degrade to the indeterminate outcome of
/// the same direction, and the target's cause becomes the result's cause.
fn promote_for_indeterminate_target(
    combine_result: EvaluationResult,
    node: &PolicyNode,
    target: ExpressionResult,
) -> EvaluationResult {
    let outcome = match combine_result.result {
        EvaluationOutcome::NotApplicable => return EvaluationResult::not_applicable(),
        EvaluationOutcome::Permit | EvaluationOutcome::IndeterminateP => {
            EvaluationOutcome::IndeterminateP
        }
        EvaluationOutcome::Deny | EvaluationOutcome::IndeterminateD => {
            EvaluationOutcome::IndeterminateD
        }
        EvaluationOutcome::Indeterminate | EvaluationOutcome::IndeterminateDp => {
            EvaluationOutcome::IndeterminateDp
        }
    };

    let mut target_cause =
        target.cause.unwrap_or_else(|| IndeterminateCause::new(CauseCode::ProcessingError));
    target_cause.describe("Target", &node.target().id);
    let cause =
        IndeterminateCause::new(CauseCode::ProcessingError).with_sub_causes(vec![target_cause]);
    EvaluationResult::indeterminate(outcome, cause)
}

// ---------------------------------------------------------------------------
// Principle implementations for the combining layer
// ---------------------------------------------------------------------------

impl Principle for EffectiveRule<'_> {
    const COMBINES_RULES: bool = true;

    fn id(&self) -> &str {
        &self.rule().id
    }

    fn kind_label(&self) -> &'static str {
        "Rule"
    }

    fn target(&self) -> Option<&Expression> {
        EffectiveRule::target(self)
    }

    fn evaluate(
        &self,
        predicates: &dyn PredicateEngine,
        ctx: &EvaluationContext<'_>,
    ) -> Result<EvaluationResult> {
        Ok(evaluate_effective_rule(predicates, ctx, self))
    }
}

impl Principle for PolicyNode {
    const COMBINES_RULES: bool = false;

    fn id(&self) -> &str {
        PolicyNode::id(self)
    }

    fn kind_label(&self) -> &'static str {
        PolicyNode::kind_label(self)
    }

    fn target(&self) -> Option<&Expression> {
        Some(PolicyNode::target(self))
    }

    fn evaluate(
        &self,
        predicates: &dyn PredicateEngine,
        ctx: &EvaluationContext<'_>,
    ) -> Result<EvaluationResult> {
        evaluate_node(predicates, ctx, self)
    }
}
