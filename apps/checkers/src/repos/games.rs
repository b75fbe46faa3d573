//! Game repository functions for the service layer.

use std::fmt;
use std::str::FromStr;

use time::OffsetDateTime;

use crate::adapters::games_kv;
use crate::domain::player::{parse_player_or_none, player_or_none_str};
use crate::domain::{format_deadline, parse_deadline, Board, Player};
use crate::entities::{StoredGame, NO_FIFO_INDEX};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::infra::Context;

/// Game identifier, assigned once by the allocator and stored in decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(u64);

impl GameId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GameId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::validation(
                ValidationKind::InvalidGameId,
                format!("not a game index: {s:?}"),
            ));
        }
        s.parse::<u64>().map(GameId).map_err(|e| {
            DomainError::validation(ValidationKind::InvalidGameId, format!("{s:?}: {e}"))
        })
    }
}

pub(crate) fn link_to_str(link: Option<GameId>) -> String {
    link.map_or_else(|| NO_FIFO_INDEX.to_string(), |id| id.to_string())
}

pub(crate) fn parse_link(s: &str) -> Result<Option<GameId>, DomainError> {
    if s == NO_FIFO_INDEX {
        return Ok(None);
    }
    s.parse()
        .map(Some)
        .map_err(|e| DomainError::data_corruption(format!("queue link {s:?}: {e}")))
}

/// Game domain model
///
/// Converted from the stored form ([`StoredGame`]) when loaded. A game with a
/// `turn` is active and linked into the expiry queue; a game with a `winner`
/// is terminal and unlinked.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: GameId,
    pub board: Board,
    pub turn: Option<Player>,
    pub black: String,
    pub red: String,
    pub wager: u64,
    pub deadline: OffsetDateTime,
    pub winner: Option<Player>,
    pub move_count: u64,
    pub prev: Option<GameId>,
    pub next: Option<GameId>,
}

impl Game {
    /// Fresh game on the starting board with black to move. Not yet linked.
    pub fn new(
        id: GameId,
        black: impl Into<String>,
        red: impl Into<String>,
        wager: u64,
        deadline: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            board: Board::starting(),
            turn: Some(Player::Black),
            black: black.into(),
            red: red.into(),
            wager,
            deadline,
            winner: None,
            move_count: 0,
            prev: None,
            next: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }

    /// Side played by `account`, if any.
    pub fn side_of(&self, account: &str) -> Option<Player> {
        if account == self.black {
            Some(Player::Black)
        } else if account == self.red {
            Some(Player::Red)
        } else {
            None
        }
    }

    pub fn account_of(&self, side: Player) -> &str {
        match side {
            Player::Black => &self.black,
            Player::Red => &self.red,
        }
    }

    /// Whether the deadline has passed at `now`.
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.deadline < now
    }

    pub fn to_stored(&self) -> Result<StoredGame, DomainError> {
        Ok(StoredGame {
            index: self.id.to_string(),
            board: self.board.to_string(),
            turn: player_or_none_str(self.turn).to_string(),
            black: self.black.clone(),
            red: self.red.clone(),
            winner: player_or_none_str(self.winner).to_string(),
            deadline: format_deadline(self.deadline)?,
            move_count: self.move_count,
            before_index: link_to_str(self.prev),
            after_index: link_to_str(self.next),
            wager: self.wager,
        })
    }
}

impl TryFrom<StoredGame> for Game {
    type Error = DomainError;

    fn try_from(stored: StoredGame) -> Result<Self, Self::Error> {
        let corrupt =
            |field: &str, e: DomainError| DomainError::data_corruption(format!(
                "game {}: {field}: {e}",
                stored.index
            ));

        Ok(Self {
            id: stored.index.parse().map_err(|e| corrupt("index", e))?,
            board: stored.board.parse().map_err(|e| corrupt("board", e))?,
            turn: parse_player_or_none(&stored.turn).map_err(|e| corrupt("turn", e))?,
            winner: parse_player_or_none(&stored.winner).map_err(|e| corrupt("winner", e))?,
            deadline: parse_deadline(&stored.deadline).map_err(|e| corrupt("deadline", e))?,
            prev: parse_link(&stored.before_index)?,
            next: parse_link(&stored.after_index)?,
            move_count: stored.move_count,
            wager: stored.wager,
            black: stored.black,
            red: stored.red,
        })
    }
}

pub fn find_by_id(ctx: &mut Context<'_>, id: GameId) -> Result<Option<Game>, DomainError> {
    games_kv::find_by_index(ctx, &id.to_string())?
        .map(Game::try_from)
        .transpose()
}

/// Find game by ID or return error if not found.
pub fn require_game(ctx: &mut Context<'_>, id: GameId) -> Result<Game, DomainError> {
    find_by_id(ctx, id)?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, format!("game {id} not found")))
}

/// Load a game that another record links to. A dangling link is not a "not
/// found" answer to the caller but corrupted queue state.
pub(crate) fn require_linked(ctx: &mut Context<'_>, id: GameId) -> Result<Game, DomainError> {
    find_by_id(ctx, id)?.ok_or_else(|| {
        DomainError::queue_inconsistency(format!("queue links to missing game {id}"))
    })
}

/// Upsert: total overwrite of the record at the game's id.
pub fn save_game(ctx: &mut Context<'_>, game: &Game) -> Result<(), DomainError> {
    games_kv::save(ctx, &game.to_stored()?)
}

pub fn delete_game(ctx: &mut Context<'_>, id: GameId) -> Result<(), DomainError> {
    games_kv::delete(ctx, &id.to_string())
}

/// Stake held for a game: both players' wagers.
pub fn pot(wager: u64) -> Result<u64, DomainError> {
    wager.checked_mul(2).ok_or_else(|| {
        DomainError::infra(InfraErrorKind::Overflow, format!("pot for wager {wager}"))
    })
}
