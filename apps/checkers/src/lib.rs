#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Checkers chain module: game records, the deadline-ordered expiry queue and
//! wager settlement, driven by a deterministic execution host.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod genesis;
pub mod infra;
pub mod protocol;
pub mod repos;
pub mod services;


// Re-exports for public API
pub use config::{GasSchedule, ModuleParams, TerminalRecordPolicy};
pub use domain::{Board, Move, MoveEngine, MoveOutcome, Player, Pos, StandardRules};
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use genesis::{default_genesis, init_genesis, GenesisState};
pub use infra::txn::with_txn;
pub use infra::{
    BlockHeader, CacheStore, Context, Event, EventManager, FundsLedger, GasMeter,
    InMemoryLedger, KvStore, MemStore,
};
pub use repos::{Game, GameId};
pub use services::GameLifecycleService;
