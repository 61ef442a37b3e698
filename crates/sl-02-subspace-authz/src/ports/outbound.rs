//! Outbound port: gas metering provided by the execution engine.

use crate::domain::errors::AuthzError;

/// Meters the work performed while evaluating an authorization.
pub trait GasMeter {
    /// Consume `amount` units, failing once the limit would be exceeded.
    fn consume_gas(&mut self, amount: u64, descriptor: &str) -> Result<(), AuthzError>;

    /// Units consumed so far.
    fn gas_consumed(&self) -> u64;
}
