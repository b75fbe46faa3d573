use tracing::{debug, info};

use super::GameLifecycleService;
use crate::error::AppError;
use crate::infra::txn::with_txn;
use crate::infra::{Context, FundsLedger};
use crate::repos::{system_info, GameId};
use crate::services::expiry_queue;

impl<E> GameLifecycleService<E> {
    /// Block-boundary hook: forfeit every game at the front of the queue whose
    /// deadline has passed.
    ///
    /// Each forfeiture commits on its own before the next head is looked at.
    /// An error stops the sweep; forfeitures already committed stay.
    pub fn sweep_expired(
        &self,
        ctx: &mut Context<'_>,
        funds: &mut dyn FundsLedger,
    ) -> Result<Vec<GameId>, AppError> {
        let now = ctx.block_time();
        let mut forfeited = Vec::new();

        loop {
            let info = system_info::require(ctx)?;
            let head = expiry_queue::front_expired(ctx, &info, now)
                .next()
                .transpose()?;
            let Some(game) = head else {
                break;
            };

            let id = game.id;
            debug!(game_index = %id, deadline = %game.deadline, "Sweeping expired game");
            with_txn(ctx, |txn| self.forfeit_expired(txn, &mut *funds, game))?;
            forfeited.push(id);
        }

        if !forfeited.is_empty() {
            info!(count = forfeited.len(), height = ctx.block_height(), "Expired games forfeited");
        }
        Ok(forfeited)
    }
}
