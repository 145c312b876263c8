//! Error types for the authz-core crate
//!
//! Evaluation anomalies never surface here: they become INDETERMINATE results
//! carrying an [`IndeterminateCause`](crate::evaluation::IndeterminateCause)
//! tree. This module only covers the abort channel for configuration and
//! programmer errors, which is kept disjoint from evaluation outcomes.

use crate::domain::CombineAlgorithm;

/// Result type alias for authz-core operations
pub type Result<T> = std::result::Result<T, AuthzError>;

/// Main error type for authz-core
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// A combining algorithm that is only defined for policy children was
    /// requested for a rule list.
    #[error("combining algorithm {algorithm} is not applicable to rule lists")]
    RuleCombiningUnsupported { algorithm: CombineAlgorithm },

    /// A policy document violated a structural constraint that deserialization
    /// alone cannot catch.
    #[error("malformed policy document: {reason}")]
    MalformedPolicy { reason: String },

    /// JSON serialization/deserialization error
    #[error("JSON processing error")]
    Json(#[from] serde_json::Error),
}
