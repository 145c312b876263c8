//! The request handed to the PDP

use std::sync::Arc;

use crate::context::{Action, Environment, EvaluationContext, Resource, Subject};
use crate::domain::PolicyNode;

/// One authorization question: may this subject perform this action on this
/// resource, in this environment, under this policy tree?
///
/// The policy tree is shared (`Arc`) because it is loaded once and outlives
/// many evaluations; the attribute sources are owned per request.
#[derive(Debug, Clone)]
pub struct AuthzRequest {
    /// Who is asking.
    pub subject: Subject,
    /// What they want to act on.
    pub resource: Resource,
    /// What they want to do.
    pub action: Action,
    /// The world around the request.
    pub environment: Environment,
    /// Root of the policy tree to evaluate against.
    pub policy: Arc<PolicyNode>,
}

impl AuthzRequest {
    pub fn new(
        subject: Subject,
        resource: Resource,
        action: Action,
        environment: Environment,
        policy: Arc<PolicyNode>,
    ) -> Self {
        Self { subject, resource, action, environment, policy }
    }

    /// The read-only context view predicates evaluate against.
    pub fn context(&self) -> EvaluationContext<'_> {
        EvaluationContext::new(&self.subject, &self.resource, &self.action, &self.environment)
    }
}
