//! Typed access to persisted records.

pub mod games;
pub mod system_info;

pub use games::{Game, GameId};
pub use system_info::SystemInfo;
