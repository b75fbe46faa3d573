//! Read-only views. Queries are metered like commands but never write.

use crate::domain::{Move, MoveEngine, Player, Pos};
use crate::entities;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::infra::Context;
use crate::protocol::{CanPlayMoveResponse, QueryCanPlayMove};
use crate::repos::{games, system_info, GameId};
use crate::services::game_lifecycle::GameLifecycleService;

pub const REASON_OK: &str = "ok";
pub const REASON_FINISHED: &str = "game is already finished";

pub fn system_info(ctx: &mut Context<'_>) -> Result<entities::SystemInfo, AppError> {
    Ok(system_info::require(ctx)?.to_stored())
}

pub fn stored_game(ctx: &mut Context<'_>, index: &str) -> Result<entities::StoredGame, AppError> {
    let id: GameId = index.parse()?;
    Ok(games::require_game(ctx, id)?.to_stored()?)
}

fn cannot(reason: impl Into<String>) -> CanPlayMoveResponse {
    CanPlayMoveResponse {
        possible: false,
        reason: reason.into(),
    }
}

impl<E: MoveEngine> GameLifecycleService<E> {
    /// Dry-run a move against the stored game without changing anything.
    pub fn can_play_move(
        &self,
        ctx: &mut Context<'_>,
        query: &QueryCanPlayMove,
    ) -> Result<CanPlayMoveResponse, AppError> {
        let id: GameId = query.game_index.parse()?;
        let player: Player = query.player.parse()?;
        let game = games::require_game(ctx, id)?;

        if game.is_terminal() {
            return Ok(cannot(REASON_FINISHED));
        }
        if game.turn != Some(player) {
            return Ok(cannot(format!(
                "player tried to play out of turn: {}",
                player.color()
            )));
        }
        let (Some(from), Some(to)) = (
            Pos::from_coords(query.from_x, query.from_y),
            Pos::from_coords(query.to_x, query.to_y),
        ) else {
            return Ok(cannot("wrong move: coordinates are off the board"));
        };

        match self.engine().apply(&game.board, Move::new(from, to), player) {
            Ok(_) => Ok(CanPlayMoveResponse {
                possible: true,
                reason: REASON_OK.to_string(),
            }),
            Err(DomainError::Validation(ValidationKind::IllegalMove, detail)) => {
                Ok(cannot(format!("wrong move: {detail}")))
            }
            Err(other) => Err(other.into()),
        }
    }
}
