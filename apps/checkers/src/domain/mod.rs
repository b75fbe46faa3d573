//! Pure game logic: no storage, no host.

pub mod board;
pub mod deadline;
pub mod game_event;
pub mod player;
pub mod rules;

pub use board::{Board, Piece, Pos, STARTING_BOARD};
pub use deadline::{format_deadline, parse_deadline};
pub use game_event::GameEvent;
pub use player::{Player, NO_PLAYER};
pub use rules::{Move, MoveEngine, MoveOutcome, StandardRules};
