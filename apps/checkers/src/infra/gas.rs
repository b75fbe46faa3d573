//! Gas metering for commands.

use crate::errors::domain::{DomainError, InfraErrorKind};

/// Per-operation storage costs, charged on every store access made through
/// [`crate::infra::Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KvGasConfig {
    pub has_cost: u64,
    pub delete_cost: u64,
    pub read_cost_flat: u64,
    pub read_cost_per_byte: u64,
    pub write_cost_flat: u64,
    pub write_cost_per_byte: u64,
}

impl Default for KvGasConfig {
    fn default() -> Self {
        Self {
            has_cost: 1_000,
            delete_cost: 1_000,
            read_cost_flat: 1_000,
            read_cost_per_byte: 3,
            write_cost_flat: 2_000,
            write_cost_per_byte: 30,
        }
    }
}

impl KvGasConfig {
    pub fn read_cost(&self, key_len: usize, value_len: usize) -> u64 {
        self.read_cost_flat + self.read_cost_per_byte * (key_len + value_len) as u64
    }

    pub fn write_cost(&self, key_len: usize, value_len: usize) -> u64 {
        self.write_cost_flat + self.write_cost_per_byte * (key_len + value_len) as u64
    }
}

/// Gas meter for one command (or one block-boundary hook).
///
/// `None` limit means infinite gas, which the host uses for genesis and
/// begin/end-block processing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GasMeter {
    limit: Option<u64>,
    consumed: u64,
}

impl GasMeter {
    pub fn infinite() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: u64) -> Self {
        Self {
            limit: Some(limit),
            consumed: 0,
        }
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    pub fn remaining(&self) -> Option<u64> {
        self.limit.map(|l| l.saturating_sub(self.consumed))
    }

    /// Charge `amount`. Exceeding the limit pins consumption at the limit and
    /// fails the command.
    pub fn consume(&mut self, amount: u64, descriptor: &str) -> Result<(), DomainError> {
        let next = self.consumed.saturating_add(amount);
        match self.limit {
            Some(limit) if next > limit => {
                self.consumed = limit;
                Err(DomainError::infra(
                    InfraErrorKind::OutOfGas,
                    format!("out of gas in {descriptor}: limit {limit}, wanted {next}"),
                ))
            }
            _ => {
                self.consumed = next;
                Ok(())
            }
        }
    }

    pub fn refund(&mut self, amount: u64, descriptor: &str) {
        tracing::trace!(amount, descriptor, "gas refund");
        self.consumed = self.consumed.saturating_sub(amount);
    }
}
