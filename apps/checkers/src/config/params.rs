use std::env;

use serde::{Deserialize, Serialize};
use time::Duration;

use crate::error::AppError;

pub const MAX_TURN_SECS_VAR: &str = "CHECKERS_MAX_TURN_SECS";
pub const TERMINAL_RECORDS_VAR: &str = "CHECKERS_TERMINAL_RECORDS";

/// What happens to a game record once it has a winner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalRecordPolicy {
    /// Keep the record with the winner set and the queue links cleared
    #[default]
    Retain,
    /// Remove the record once settled
    Delete,
}

impl TerminalRecordPolicy {
    fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "retain" => Ok(Self::Retain),
            "delete" => Ok(Self::Delete),
            other => Err(AppError::config(format!(
                "{TERMINAL_RECORDS_VAR} must be 'retain' or 'delete', got '{other}'"
            ))),
        }
    }
}

/// Flat gas charged (or refunded) per command on top of storage access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasSchedule {
    pub create_game: u64,
    pub play_move: u64,
    pub reject_refund: u64,
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self {
            create_game: 15_000,
            play_move: 5_000,
            reject_refund: 14_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleParams {
    /// Time a player has to move before forfeiting
    pub max_turn_duration: Duration,
    pub terminal_records: TerminalRecordPolicy,
    pub gas: GasSchedule,
}

impl Default for ModuleParams {
    fn default() -> Self {
        Self {
            max_turn_duration: Duration::hours(24),
            terminal_records: TerminalRecordPolicy::default(),
            gas: GasSchedule::default(),
        }
    }
}

impl ModuleParams {
    /// Defaults overridden from the environment. Unset variables keep their default.
    pub fn from_env() -> Result<Self, AppError> {
        let mut params = Self::default();

        if let Some(raw) = optional_var(MAX_TURN_SECS_VAR)? {
            let secs: i64 = raw.trim().parse().map_err(|_| {
                AppError::config(format!(
                    "{MAX_TURN_SECS_VAR} must be a positive integer, got '{raw}'"
                ))
            })?;
            params.max_turn_duration = Duration::seconds(secs);
        }
        if let Some(raw) = optional_var(TERMINAL_RECORDS_VAR)? {
            params.terminal_records = TerminalRecordPolicy::parse(&raw)?;
        }

        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_turn_duration <= Duration::ZERO {
            return Err(AppError::config(format!(
                "max turn duration must be positive, got {}",
                self.max_turn_duration
            )));
        }
        Ok(())
    }
}

/// Read an optional variable; present-but-not-unicode is an error.
fn optional_var(name: &str) -> Result<Option<String>, AppError> {
    match env::var(name) {
        Ok(v) => Ok(Some(v)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
