//! Request context for attribute-based access control evaluation
//!
//! The context bundles the four attribute sources (subject, resource, action,
//! environment) that predicates reference during an evaluation. It is
//! assembled by the enforcement layer before the PDP is invoked and is
//! read-only for the duration of an evaluation.

mod action;
mod environment;
mod resource;
mod subject;

pub use action::{Action, HttpRequest, RequestMetadata};
pub use environment::Environment;
pub use resource::Resource;
pub use subject::Subject;

/// Borrowed view over the four attribute sources of a single evaluation.
///
/// The resource slot is named `object` so that predicate paths read
/// `object.…`, matching the paths policies are written against.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// The subject making the request, typically a user or service identity.
    pub subject: &'a Subject,
    /// The resource the subject wants to act on.
    pub object: &'a Resource,
    /// The action the subject intends to perform.
    pub action: &'a Action,
    /// Ambient environment attributes (time, deployment, feature state, …).
    pub environment: &'a Environment,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(
        subject: &'a Subject,
        object: &'a Resource,
        action: &'a Action,
        environment: &'a Environment,
    ) -> Self {
        Self { subject, object, action, environment }
    }
}
