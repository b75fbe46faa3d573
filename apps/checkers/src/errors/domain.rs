//! Domain-level error type used across services, repos and adapters.
//!
//! This error type is host-agnostic. Commands return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation kinds: the command itself is malformed or not allowed for this caller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Black and red are the same account, or one of them is empty
    InvalidPlayers,
    /// Caller is neither black nor red
    NotAPlayer,
    /// Caller is a player but not the side to move
    WrongTurn,
    /// Rejected by the move-legality engine
    IllegalMove,
    InvalidGameId,
    InvalidBoard,
    InvalidDeadline,
    InvalidGenesis,
    Other(String),
}

/// Conflict kinds: the command is well-formed but the game is in the wrong phase.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Action invalid for the current game phase (e.g. rejecting a played game)
    WrongState,
    /// Explicit forfeit attempted before the deadline elapsed
    StillActive,
    /// Game already has a winner
    GameFinished,
    /// Escrow could not be placed
    InsufficientFunds,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    SystemInfo,
    Other(String),
}

/// Infra error kinds: operational failures, all fatal to the enclosing command.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    OutOfGas,
    /// A stored record could not be decoded
    DataCorruption,
    /// Expiry queue links disagree with each other
    QueueInconsistency,
    /// The funds ledger refused a release or transfer of escrowed funds
    Funds,
    Overflow,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict with current game state
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Shorthand for the expiry-queue consistency failure.
    pub fn queue_inconsistency(detail: impl Into<String>) -> Self {
        Self::Infra(InfraErrorKind::QueueInconsistency, detail.into())
    }

    pub fn data_corruption(detail: impl Into<String>) -> Self {
        Self::Infra(InfraErrorKind::DataCorruption, detail.into())
    }

    /// Business errors leave state untouched and may be retried or answered
    /// with a different command; infra errors may not.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DomainError::Infra(..))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::data_corruption(format!("record codec: {e}"))
    }
}
