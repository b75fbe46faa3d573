pub mod expiry_queue;
pub mod game_lifecycle;
pub mod queries;
pub mod wager;

pub use game_lifecycle::GameLifecycleService;
