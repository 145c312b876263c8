//! PDP configuration

use super::strategy::DecisionStrategy;

/// Configuration of a policy decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdpConfiguration {
    /// How evaluation outcomes reduce to the final binary decision.
    pub decision_strategy: DecisionStrategy,
}

impl PdpConfiguration {
    pub fn new(decision_strategy: DecisionStrategy) -> Self {
        Self { decision_strategy }
    }
}

impl Default for PdpConfiguration {
    /// Fail-closed: anything unclear denies.
    fn default() -> Self {
        Self::new(DecisionStrategy::DefaultDeny)
    }
}
