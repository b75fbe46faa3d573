use tracing::{debug, info, warn};

use super::{parse_game_index, GameLifecycleService};
use crate::domain::{GameEvent, Player};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::infra::txn::with_txn;
use crate::infra::{Context, FundsLedger};
use crate::protocol::{MsgRejectGame, MsgRejectGameResponse};
use crate::repos::games;
use crate::repos::system_info;
use crate::services::{expiry_queue, wager};

impl<E> GameLifecycleService<E> {
    /// Cancel a game a player has not yet moved in. Both stakes are refunded
    /// and the record is deleted.
    pub fn reject_game(
        &self,
        ctx: &mut Context<'_>,
        funds: &mut dyn FundsLedger,
        msg: &MsgRejectGame,
    ) -> Result<MsgRejectGameResponse, AppError> {
        debug!(creator = %msg.creator, game_index = %msg.game_index, "Rejecting game");

        with_txn(ctx, |txn| {
            let id = parse_game_index(&msg.game_index)?;
            let mut game = games::require_game(txn, id)?;
            if game.is_terminal() {
                return Err(DomainError::not_found(
                    NotFoundKind::Game,
                    format!("game {id} is already finished"),
                )
                .into());
            }

            let side = game.side_of(&msg.creator).ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::NotAPlayer,
                    format!("{} is not a player in game {id}", msg.creator),
                )
            })?;
            // Each side may back out until it has made its own first move.
            let allowed = match side {
                Player::Black => game.move_count == 0,
                Player::Red => game.move_count <= 1,
            };
            if !allowed {
                warn!(game_index = %id, player = %msg.creator, moves = game.move_count, "Reject after play");
                return Err(DomainError::conflict(
                    ConflictKind::WrongState,
                    format!("{} has already played in game {id}", side.color()),
                )
                .into());
            }

            let mut info = system_info::require(txn)?;
            expiry_queue::remove(txn, &mut info, &mut game)?;
            system_info::save(txn, &info)?;
            games::delete_game(txn, id)?;
            txn.gas_meter_mut()
                .refund(self.params.gas.reject_refund, "Reject game");

            wager::settle(funds, &wager::refund_plan(&game))?;

            txn.emit(
                GameEvent::Rejected {
                    creator: msg.creator.clone(),
                    game_index: id.to_string(),
                    refund: game.wager,
                }
                .into_event(),
            );
            info!(game_index = %id, player = %msg.creator, refund = game.wager, "Game rejected");

            Ok(MsgRejectGameResponse {})
        })
    }
}
