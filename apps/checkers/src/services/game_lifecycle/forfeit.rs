use tracing::{debug, info};

use super::{parse_game_index, GameLifecycleService};
use crate::domain::GameEvent;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::infra::txn::with_txn;
use crate::infra::{Context, FundsLedger};
use crate::protocol::{MsgForfeitGame, MsgForfeitGameResponse};
use crate::repos::games::{self, pot, Game};
use crate::repos::system_info;
use crate::services::wager;

impl<E> GameLifecycleService<E> {
    /// Claim a timed-out game. The caller must be one of its players and the
    /// deadline must already have passed.
    pub fn forfeit_game(
        &self,
        ctx: &mut Context<'_>,
        funds: &mut dyn FundsLedger,
        msg: &MsgForfeitGame,
    ) -> Result<MsgForfeitGameResponse, AppError> {
        debug!(creator = %msg.creator, game_index = %msg.game_index, "Forfeit requested");

        with_txn(ctx, |txn| {
            let id = parse_game_index(&msg.game_index)?;
            let game = games::require_game(txn, id)?;
            if game.is_terminal() {
                return Err(DomainError::conflict(
                    ConflictKind::GameFinished,
                    format!("game {id} is already finished"),
                )
                .into());
            }
            if game.side_of(&msg.creator).is_none() {
                return Err(DomainError::validation(
                    ValidationKind::NotAPlayer,
                    format!("{} is not a player in game {id}", msg.creator),
                )
                .into());
            }
            let now = txn.block_time();
            if !game.is_expired(now) {
                return Err(DomainError::conflict(
                    ConflictKind::StillActive,
                    format!("game {id} has until {}", game.deadline),
                )
                .into());
            }

            let winner = self.forfeit_expired(txn, funds, game)?;
            Ok(MsgForfeitGameResponse { winner })
        })
    }

    /// Forfeit an expired active game on behalf of the side that ran out of
    /// time. Shared by the explicit command and the block sweep; the caller
    /// provides the enclosing branch.
    pub(super) fn forfeit_expired(
        &self,
        ctx: &mut Context<'_>,
        funds: &mut dyn FundsLedger,
        mut game: Game,
    ) -> Result<String, AppError> {
        let id = game.id;
        let loser = game.turn.ok_or_else(|| {
            DomainError::data_corruption(format!("active game {id} has no turn"))
        })?;
        let winner = loser.opponent();
        let payout = pot(game.wager)?;

        let mut info = system_info::require(ctx)?;
        self.conclude(ctx, &mut info, &mut game, winner)?;
        let winner_account = game.account_of(winner).to_string();
        wager::settle(funds, &wager::payout_plan(&game, &winner_account)?)?;

        ctx.emit(
            GameEvent::Forfeited {
                game_index: id.to_string(),
                winner: winner.as_str().to_string(),
                board: game.board.to_string(),
                payout,
            }
            .into_event(),
        );
        info!(game_index = %id, winner = %winner_account, payout, "Game forfeited");

        Ok(winner.as_str().to_string())
    }
}
