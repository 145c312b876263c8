//! # Authz Core - ABAC Decision Engine
//!
//! An attribute-based access control decision engine with XACML 3.0
//! combining semantics. Given a policy tree and a request context, the
//! engine yields one of seven evaluation outcomes and reduces it to a
//! binary PERMIT/DENY under a configurable strategy, with machine-readable
//! cause trees whenever evaluation cannot complete.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use authz_core::prelude::*;
//!
//! let policy = authz_core::document::from_json_str(r#"{
//!     "id": "notes",
//!     "target": {"id": "t", "type": "LITERAL", "expression": "object.name == 'note'"},
//!     "combineAlgorithmName": "DENY_OVERRIDES",
//!     "rules": [
//!         {
//!             "id": "owner-read",
//!             "effect": "PERMIT",
//!             "condition": {
//!                 "id": "c",
//!                 "type": "LITERAL",
//!                 "expression": "object.data.owner == subject.user_id"
//!             }
//!         }
//!     ]
//! }"#)?;
//!
//! let engine = PdpEngine::new(
//!     PdpConfiguration::new(DecisionStrategy::DefaultDeny),
//!     ContextPredicate::new(),
//! );
//! let request = AuthzRequest::new(
//!     Subject::new("alice"),
//!     Resource::with_data("note", serde_json::json!({"owner": "alice"})),
//!     Action::new(),
//!     Environment::new(),
//!     Arc::new(policy),
//! );
//!
//! let decision = engine.authorize(&request)?;
//! assert!(decision.is_permit());
//! # Ok::<(), authz_core::AuthzError>(())
//! ```
//!
//! ## Design
//!
//! - **Nothing throws from evaluation**: predicate failures, empty
//!   compositions, and broken targets all become indeterminate results with
//!   structured causes; the `Err` channel is reserved for configuration
//!   misuse.
//! - **Pluggable predicate language**: literal expression bodies are opaque
//!   strings handed to an injected [`predicate::PredicateEngine`]; the
//!   built-in [`predicate::ContextPredicate`] covers attribute comparisons.
//! - **Pure evaluation**: no I/O, no shared mutable state; one engine serves
//!   concurrent evaluations without coordination.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, future_incompatible)]

mod combining;

pub mod context;
pub mod document;
pub mod domain;
pub mod errors;
pub mod evaluation;
pub mod pdp;
pub mod predicate;

pub use errors::{AuthzError, Result};

/// Convenient re-exports for common use cases
pub mod prelude {
    pub use crate::context::{
        Action, Environment, EvaluationContext, HttpRequest, Resource, Subject,
    };
    pub use crate::domain::{
        CombinationType, CombineAlgorithm, Effect, Expression, Policy, PolicyNode, PolicySet, Rule,
    };
    pub use crate::errors::{AuthzError, Result};
    pub use crate::evaluation::{
        CauseCode, EvaluationOutcome, EvaluationResult, IndeterminateCause,
    };
    pub use crate::pdp::{
        AuthzDecision, AuthzRequest, Decision, DecisionDetails, DecisionStrategy,
        PdpConfiguration, PdpEngine,
    };
    pub use crate::predicate::{ContextPredicate, PredicateEngine, PredicateError};
}
