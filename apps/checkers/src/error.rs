use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;

/// Error returned to the execution host by every command, query and hook.
///
/// A failed command has applied no mutation. Fatal variants additionally mean
/// the module detected corrupted state or an unrecoverable settlement failure
/// and must not be retried blindly.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Out of gas: {detail}")]
    OutOfGas { detail: String },
    #[error("Inconsistent state: {detail}")]
    Inconsistent { code: ErrorCode, detail: String },
    #[error("Funds ledger error: {detail}")]
    Funds { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::OutOfGas { .. } => ErrorCode::OutOfGas,
            AppError::Inconsistent { code, .. } => *code,
            AppError::Funds { .. } => ErrorCode::FundsLedger,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { code, .. } => *code,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::OutOfGas { detail }
            | AppError::Inconsistent { detail, .. }
            | AppError::Funds { detail }
            | AppError::Config { detail }
            | AppError::Internal { detail, .. } => detail,
        }
    }

    /// Fatal errors signal prior state corruption or a settlement that could
    /// not be carried out; the host should surface them loudly.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AppError::Inconsistent { .. } | AppError::Funds { .. } | AppError::Internal { .. }
        )
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::Internal,
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::InvalidPlayers => ErrorCode::InvalidPlayers,
                    ValidationKind::NotAPlayer => ErrorCode::NotAPlayer,
                    ValidationKind::WrongTurn => ErrorCode::WrongTurn,
                    ValidationKind::IllegalMove => ErrorCode::IllegalMove,
                    ValidationKind::InvalidGameId => ErrorCode::InvalidGameId,
                    ValidationKind::InvalidBoard => ErrorCode::InvalidBoard,
                    ValidationKind::InvalidDeadline => ErrorCode::InvalidDeadline,
                    ValidationKind::InvalidGenesis => ErrorCode::InvalidGenesis,
                    ValidationKind::Other(_) => ErrorCode::ValidationError,
                };
                AppError::invalid(code, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::WrongState => ErrorCode::WrongState,
                    ConflictKind::StillActive => ErrorCode::StillActive,
                    ConflictKind::GameFinished => ErrorCode::GameFinished,
                    ConflictKind::InsufficientFunds => ErrorCode::InsufficientFunds,
                    ConflictKind::Other(_) => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Game => ErrorCode::GameNotFound,
                    NotFoundKind::SystemInfo => ErrorCode::SystemInfoNotFound,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::OutOfGas => AppError::OutOfGas { detail },
                InfraErrorKind::DataCorruption => AppError::Inconsistent {
                    code: ErrorCode::DataCorruption,
                    detail,
                },
                InfraErrorKind::QueueInconsistency => AppError::Inconsistent {
                    code: ErrorCode::QueueInconsistency,
                    detail,
                },
                InfraErrorKind::Funds => AppError::Funds { detail },
                InfraErrorKind::Overflow => AppError::Internal {
                    code: ErrorCode::Overflow,
                    detail,
                },
                InfraErrorKind::Other(_) => AppError::internal(detail),
            },
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}
