//! Records exactly as they are persisted.

pub mod stored_game;
pub mod system_info;

pub use stored_game::StoredGame;
pub use system_info::SystemInfo;

/// Stored value of an absent queue link or an empty queue end.
pub const NO_FIFO_INDEX: &str = "-1";
