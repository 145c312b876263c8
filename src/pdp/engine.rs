//! Policy decision point engine
//!
//! The engine ties the pieces together: it runs the policy evaluator over
//! the request's policy tree and reduces the outcome to a binary decision
//! under the configured strategy. It holds no mutable state; one engine may
//! serve any number of concurrent evaluations.

use tracing::info;

use crate::errors::Result;
use crate::evaluation::{self, EvaluationResult};
use crate::predicate::PredicateEngine;

use super::config::PdpConfiguration;
use super::decision::{AuthzDecision, DecisionDetails};
use super::request::AuthzRequest;

/// The policy decision point.
///
/// The predicate engine is injected at construction; the engine never
/// consults any process-wide registry.
pub struct PdpEngine {
    configuration: PdpConfiguration,
    predicates: Box<dyn PredicateEngine + Send + Sync>,
}

impl PdpEngine {
    pub fn new(
        configuration: PdpConfiguration,
        predicates: impl PredicateEngine + Send + Sync + 'static,
    ) -> Self {
        Self { configuration, predicates: Box::new(predicates) }
    }

    pub fn configuration(&self) -> &PdpConfiguration {
        &self.configuration
    }

    /// Evaluates the request's policy tree to one of the seven outcomes.
    ///
    /// # Errors
    /// Returns an error only for configuration misuse in the policy tree;
    /// every evaluation-time anomaly is an indeterminate result.
    pub fn evaluate(&self, request: &AuthzRequest) -> Result<EvaluationResult> {
        evaluation::evaluate_node(self.predicates.as_ref(), &request.context(), &request.policy)
    }

    /// Evaluates the request and reduces the outcome to a binary decision.
    ///
    /// The decision's `details` carry the cause tree for indeterminate
    /// outcomes and a short message when no policy applied.
    ///
    /// # Errors
    /// Same error channel as [`evaluate`](Self::evaluate).
    pub fn authorize(&self, request: &AuthzRequest) -> Result<AuthzDecision> {
        let result = self.evaluate(request)?;
        let decision = self.configuration.decision_strategy.decide(&result);

        let details = if result.is_indeterminate() {
            result.cause.map(DecisionDetails::Cause)
        } else if result.is_not_applicable() {
            Some(DecisionDetails::Message("No policy applicable".into()))
        } else {
            None
        };

        info!(
            subject = %request.subject.user_id,
            resource = %request.resource.name,
            policy = %request.policy.id(),
            outcome = ?result.result,
            decision = ?decision,
            "authorization decision made"
        );
        Ok(AuthzDecision::new(decision, details))
    }
}
