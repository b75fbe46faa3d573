//! Game lifecycle orchestration: bridges pure game logic with the host store,
//! the expiry queue and wager settlement.
//!
//! Every command runs inside [`with_txn`](crate::infra::txn::with_txn): all
//! store and queue mutations happen in the branch, fund movements are
//! requested last, and the single lifecycle event is emitted only once
//! settlement has gone through.

mod create;
mod forfeit;
mod play;
mod reject;
mod sweep;

use time::OffsetDateTime;

use crate::config::{ModuleParams, TerminalRecordPolicy};
use crate::domain::{Player, StandardRules};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::Context;
use crate::repos::games::{self, Game, GameId};
use crate::repos::{system_info, SystemInfo};
use crate::services::expiry_queue;

/// Lifecycle service, generic over the move-legality engine.
#[derive(Debug, Clone, Default)]
pub struct GameLifecycleService<E = StandardRules> {
    params: ModuleParams,
    engine: E,
}

impl GameLifecycleService<StandardRules> {
    pub fn new(params: ModuleParams) -> Self {
        Self::with_engine(params, StandardRules)
    }
}

impl<E> GameLifecycleService<E> {
    pub fn with_engine(params: ModuleParams, engine: E) -> Self {
        Self { params, engine }
    }

    pub fn params(&self) -> &ModuleParams {
        &self.params
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn next_deadline(&self, now: OffsetDateTime) -> Result<OffsetDateTime, DomainError> {
        now.checked_add(self.params.max_turn_duration).ok_or_else(|| {
            DomainError::infra(InfraErrorKind::Overflow, format!("deadline after {now}"))
        })
    }

    /// Take a decided game out of the queue and persist its terminal form.
    fn conclude(
        &self,
        ctx: &mut Context<'_>,
        info: &mut SystemInfo,
        game: &mut Game,
        winner: Player,
    ) -> Result<(), DomainError> {
        expiry_queue::remove(ctx, info, game)?;
        game.turn = None;
        game.winner = Some(winner);

        system_info::save(ctx, info)?;
        match self.params.terminal_records {
            TerminalRecordPolicy::Retain => games::save_game(ctx, game),
            TerminalRecordPolicy::Delete => games::delete_game(ctx, game.id),
        }
    }
}

fn parse_game_index(raw: &str) -> Result<GameId, DomainError> {
    raw.parse()
}
