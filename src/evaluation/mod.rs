//! Evaluation of expressions, rules, policies, and policy sets
//!
//! Evaluation is a pure synchronous recursion over the policy tree: no I/O,
//! no shared state, no exceptions for control flow. Anything that cannot be
//! evaluated becomes an indeterminate result carrying a structured cause
//! tree; the only `Err` channel is configuration misuse.

mod cause;
mod expression;
mod policy;
mod result;

pub use cause::{CauseCode, IndeterminateCause};
pub use expression::evaluate as evaluate_expression;
pub use policy::{
    effective_rules, evaluate_effective_rule, evaluate_node, evaluate_rule, EffectiveRule,
};
pub use result::{EvaluationOutcome, EvaluationResult, ExpressionResult, MatchOutcome};
