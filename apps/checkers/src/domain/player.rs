use std::fmt;
use std::str::FromStr;

use crate::errors::domain::{DomainError, ValidationKind};

/// Marker stored for "no side": an unset winner or the turn of a finished game.
pub const NO_PLAYER: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    Black,
    Red,
}

impl Player {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Player::Black => "b",
            Player::Red => "r",
        }
    }

    pub const fn color(&self) -> &'static str {
        match self {
            Player::Black => "black",
            Player::Red => "red",
        }
    }

    pub const fn opponent(&self) -> Player {
        match self {
            Player::Black => Player::Red,
            Player::Red => Player::Black,
        }
    }

    /// Row direction in which this side's men advance.
    pub const fn forward(&self) -> i8 {
        match self {
            Player::Black => 1,
            Player::Red => -1,
        }
    }

    /// Row on which this side's men are crowned.
    pub const fn crowning_row(&self) -> u8 {
        match self {
            Player::Black => 7,
            Player::Red => 0,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Player {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "b" => Ok(Player::Black),
            "r" => Ok(Player::Red),
            _ => Err(DomainError::validation(
                ValidationKind::Other("PARSE_PLAYER".into()),
                format!("Parse player: {s}"),
            )),
        }
    }
}

/// Encode an optional side using the `*` marker for `None`.
pub fn player_or_none_str(player: Option<Player>) -> &'static str {
    player.map_or(NO_PLAYER, |p| p.as_str())
}

/// Decode an optional side; `*` is `None`.
pub fn parse_player_or_none(s: &str) -> Result<Option<Player>, DomainError> {
    if s == NO_PLAYER {
        return Ok(None);
    }
    s.parse().map(Some)
}
