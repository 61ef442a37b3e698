//! Configuration for the subspace authorization

use serde::{Deserialize, Serialize};

/// Gas cost of scanning one granted subspace id.
pub const DEFAULT_GAS_PER_ITERATION: u64 = 10;

/// Authorization configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthzConfig {
    /// Gas consumed for every subspace id visited during acceptance
    pub gas_per_iteration: u64,
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            gas_per_iteration: DEFAULT_GAS_PER_ITERATION,
        }
    }
}
