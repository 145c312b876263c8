//! Policy decision point: the top-level orchestrator and its boundary types

mod config;
mod decision;
mod engine;
mod request;
mod strategy;

pub use config::PdpConfiguration;
pub use decision::{AuthzDecision, Decision, DecisionDetails};
pub use engine::PdpEngine;
pub use request::AuthzRequest;
pub use strategy::DecisionStrategy;
