//! Error codes for the checkers module.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! reported to the execution host alongside a failed command.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Command validation
    /// Black and red must be two distinct, non-empty accounts
    InvalidPlayers,
    /// Caller is not one of the game's players
    NotAPlayer,
    /// Caller is not the side to move
    WrongTurn,
    /// Move rejected by the rules engine
    IllegalMove,
    /// Game index is not a decimal id
    InvalidGameId,
    InvalidBoard,
    InvalidDeadline,
    InvalidGenesis,
    /// General validation error
    ValidationError,

    // Resource not found
    GameNotFound,
    SystemInfoNotFound,
    NotFound,

    // Game phase conflicts
    WrongState,
    StillActive,
    GameFinished,
    InsufficientFunds,
    Conflict,

    // Fatal conditions
    OutOfGas,
    DataCorruption,
    QueueInconsistency,
    FundsLedger,
    Overflow,
    ConfigError,
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidPlayers => "INVALID_PLAYERS",
            Self::NotAPlayer => "NOT_A_PLAYER",
            Self::WrongTurn => "WRONG_TURN",
            Self::IllegalMove => "ILLEGAL_MOVE",
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::InvalidBoard => "INVALID_BOARD",
            Self::InvalidDeadline => "INVALID_DEADLINE",
            Self::InvalidGenesis => "INVALID_GENESIS",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::SystemInfoNotFound => "SYSTEM_INFO_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::WrongState => "WRONG_STATE",
            Self::StillActive => "STILL_ACTIVE",
            Self::GameFinished => "GAME_FINISHED",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::Conflict => "CONFLICT",

            Self::OutOfGas => "OUT_OF_GAS",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::QueueInconsistency => "QUEUE_INCONSISTENCY",
            Self::FundsLedger => "FUNDS_LEDGER",
            Self::Overflow => "OVERFLOW",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
