use crate::domain::errors::AuthzError;
use crate::ports::outbound::GasMeter;
use tracing::debug;

/// Gas meter with a hard limit.
#[derive(Debug, Clone)]
pub struct BasicGasMeter {
    limit: u64,
    consumed: u64,
}

impl BasicGasMeter {
    pub fn new(limit: u64) -> Self {
        Self { limit, consumed: 0 }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.consumed)
    }
}

impl GasMeter for BasicGasMeter {
    fn consume_gas(&mut self, amount: u64, descriptor: &str) -> Result<(), AuthzError> {
        let remaining = self.remaining();
        if amount > remaining {
            debug!(needed = amount, remaining, descriptor, "Gas limit exceeded");
            // The meter is exhausted once the limit has been hit
            self.consumed = self.limit;
            return Err(AuthzError::OutOfGas {
                descriptor: descriptor.to_string(),
                needed: amount,
                remaining,
            });
        }
        self.consumed += amount;
        Ok(())
    }

    fn gas_consumed(&self) -> u64 {
        self.consumed
    }
}

/// Gas meter that only counts.
#[derive(Debug, Clone, Default)]
pub struct InfiniteGasMeter {
    consumed: u64,
}

impl InfiniteGasMeter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GasMeter for InfiniteGasMeter {
    fn consume_gas(&mut self, amount: u64, _descriptor: &str) -> Result<(), AuthzError> {
        self.consumed = self.consumed.saturating_add(amount);
        Ok(())
    }

    fn gas_consumed(&self) -> u64 {
        self.consumed
    }
}
