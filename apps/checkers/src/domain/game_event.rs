use crate::infra::Event;

pub const NEW_GAME_CREATED: &str = "new-game-created";
pub const MOVE_PLAYED: &str = "move-played";
pub const GAME_WON: &str = "game-won";
pub const GAME_FORFEITED: &str = "game-forfeited";
pub const GAME_REJECTED: &str = "game-rejected";

/// Lifecycle events emitted by the module, one per successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Created {
        creator: String,
        game_index: String,
        black: String,
        red: String,
        wager: u64,
    },
    MovePlayed {
        creator: String,
        game_index: String,
        captured_x: i64,
        captured_y: i64,
        winner: String,
        board: String,
    },
    Won {
        creator: String,
        game_index: String,
        captured_x: i64,
        captured_y: i64,
        winner: String,
        board: String,
        payout: u64,
    },
    Forfeited {
        game_index: String,
        winner: String,
        board: String,
        payout: u64,
    },
    Rejected {
        creator: String,
        game_index: String,
        refund: u64,
    },
}

impl GameEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::Created { .. } => NEW_GAME_CREATED,
            GameEvent::MovePlayed { .. } => MOVE_PLAYED,
            GameEvent::Won { .. } => GAME_WON,
            GameEvent::Forfeited { .. } => GAME_FORFEITED,
            GameEvent::Rejected { .. } => GAME_REJECTED,
        }
    }

    /// Host event with attributes in their published order.
    pub fn into_event(self) -> Event {
        let event = Event::new(self.kind());
        match self {
            GameEvent::Created {
                creator,
                game_index,
                black,
                red,
                wager,
            } => event
                .with_attribute("creator", creator)
                .with_attribute("game-index", game_index)
                .with_attribute("black", black)
                .with_attribute("red", red)
                .with_attribute("wager", wager.to_string()),
            GameEvent::MovePlayed {
                creator,
                game_index,
                captured_x,
                captured_y,
                winner,
                board,
            } => event
                .with_attribute("creator", creator)
                .with_attribute("game-index", game_index)
                .with_attribute("captured-x", captured_x.to_string())
                .with_attribute("captured-y", captured_y.to_string())
                .with_attribute("winner", winner)
                .with_attribute("board", board),
            GameEvent::Won {
                creator,
                game_index,
                captured_x,
                captured_y,
                winner,
                board,
                payout,
            } => event
                .with_attribute("creator", creator)
                .with_attribute("game-index", game_index)
                .with_attribute("captured-x", captured_x.to_string())
                .with_attribute("captured-y", captured_y.to_string())
                .with_attribute("winner", winner)
                .with_attribute("board", board)
                .with_attribute("payout", payout.to_string()),
            GameEvent::Forfeited {
                game_index,
                winner,
                board,
                payout,
            } => event
                .with_attribute("game-index", game_index)
                .with_attribute("winner", winner)
                .with_attribute("board", board)
                .with_attribute("payout", payout.to_string()),
            GameEvent::Rejected {
                creator,
                game_index,
                refund,
            } => event
                .with_attribute("creator", creator)
                .with_attribute("game-index", game_index)
                .with_attribute("refund", refund.to_string()),
        }
    }
}
