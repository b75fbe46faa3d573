//! Infrastructure layer - the execution host as seen by the module.
//!
//! The host serializes commands, supplies block time, meters gas, persists
//! key-value state and collects events. Everything here is synchronous.

pub mod context;
pub mod events;
pub mod funds;
pub mod gas;
pub mod store;
pub mod txn;

pub use context::{BlockHeader, Context};
pub use events::{Attribute, Event, EventManager};
pub use funds::{FundsError, FundsLedger, InMemoryLedger};
pub use gas::{GasMeter, KvGasConfig};
pub use store::{CacheStore, KvStore, MemStore};
