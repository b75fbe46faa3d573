//! Execution context for one command or block-boundary hook.

use time::OffsetDateTime;

use super::events::{Event, EventManager};
use super::gas::{GasMeter, KvGasConfig};
use super::store::KvStore;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub height: i64,
    pub time: OffsetDateTime,
}

impl BlockHeader {
    pub fn new(height: i64, time: OffsetDateTime) -> Self {
        Self { height, time }
    }
}

/// Everything a command may touch: block header, metered storage, events.
///
/// All store access goes through [`Context::kv_get`], [`Context::kv_set`] and
/// [`Context::kv_delete`] so that every read and write is charged.
pub struct Context<'s> {
    pub(crate) header: BlockHeader,
    pub(crate) store: &'s mut dyn KvStore,
    pub(crate) gas: GasMeter,
    pub(crate) gas_config: KvGasConfig,
    pub(crate) events: EventManager,
}

impl<'s> Context<'s> {
    pub fn new(store: &'s mut dyn KvStore, header: BlockHeader) -> Self {
        Self {
            header,
            store,
            gas: GasMeter::infinite(),
            gas_config: KvGasConfig::default(),
            events: EventManager::default(),
        }
    }

    pub fn with_gas_meter(mut self, gas: GasMeter) -> Self {
        self.gas = gas;
        self
    }

    pub fn with_gas_config(mut self, gas_config: KvGasConfig) -> Self {
        self.gas_config = gas_config;
        self
    }

    pub fn block_header(&self) -> BlockHeader {
        self.header
    }

    pub fn block_time(&self) -> OffsetDateTime {
        self.header.time
    }

    pub fn block_height(&self) -> i64 {
        self.header.height
    }

    /// Move the context to a later block. Events and gas carry over.
    pub fn set_block_header(&mut self, header: BlockHeader) {
        self.header = header;
    }

    pub fn gas_meter(&self) -> &GasMeter {
        &self.gas
    }

    pub fn gas_meter_mut(&mut self) -> &mut GasMeter {
        &mut self.gas
    }

    pub fn consume_gas(&mut self, amount: u64, descriptor: &str) -> Result<(), DomainError> {
        self.gas.consume(amount, descriptor)
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take()
    }

    pub fn emit(&mut self, event: Event) {
        self.events.emit(event);
    }

    pub fn kv_get(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>, DomainError> {
        let value = self.store.get(key);
        let value_len = value.as_ref().map_or(0, Vec::len);
        let cost = self.gas_config.read_cost(key.len(), value_len);
        self.gas.consume(cost, "ReadFlat")?;
        Ok(value)
    }

    pub fn kv_has(&mut self, key: &[u8]) -> Result<bool, DomainError> {
        self.gas.consume(self.gas_config.has_cost, "Has")?;
        Ok(self.store.has(key))
    }

    pub fn kv_set(&mut self, key: &[u8], value: &[u8]) -> Result<(), DomainError> {
        let cost = self.gas_config.write_cost(key.len(), value.len());
        self.gas.consume(cost, "WriteFlat")?;
        self.store.set(key, value);
        Ok(())
    }

    pub fn kv_delete(&mut self, key: &[u8]) -> Result<(), DomainError> {
        self.gas.consume(self.gas_config.delete_cost, "Delete")?;
        self.store.delete(key);
        Ok(())
    }
}
