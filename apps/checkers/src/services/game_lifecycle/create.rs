use tracing::{debug, info};

use super::GameLifecycleService;
use crate::domain::GameEvent;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::infra::txn::with_txn;
use crate::infra::{Context, FundsLedger};
use crate::protocol::{MsgCreateGame, MsgCreateGameResponse};
use crate::repos::games::{self, pot, Game};
use crate::repos::system_info;
use crate::services::{expiry_queue, wager};

impl<E> GameLifecycleService<E> {
    /// Open a new game between `black` and `red`, black to move.
    ///
    /// Both players stake `wager`; if either stake cannot be held the command
    /// fails with no game created and no funds moved.
    pub fn create_game(
        &self,
        ctx: &mut Context<'_>,
        funds: &mut dyn FundsLedger,
        msg: &MsgCreateGame,
    ) -> Result<MsgCreateGameResponse, AppError> {
        debug!(creator = %msg.creator, black = %msg.black, red = %msg.red, wager = msg.wager, "Creating game");

        with_txn(ctx, |txn| {
            txn.consume_gas(self.params.gas.create_game, "Create game")?;

            if msg.black.is_empty() || msg.red.is_empty() {
                return Err(DomainError::validation(
                    ValidationKind::InvalidPlayers,
                    "black and red must both be set",
                )
                .into());
            }
            if msg.black == msg.red {
                return Err(DomainError::validation(
                    ValidationKind::InvalidPlayers,
                    format!("black and red are the same account: {}", msg.black),
                )
                .into());
            }
            pot(msg.wager).map_err(|_| {
                DomainError::validation(
                    ValidationKind::Other("WAGER_TOO_LARGE".into()),
                    format!("wager {} cannot be doubled", msg.wager),
                )
            })?;

            let mut info = system_info::require(txn)?;
            let id = system_info::allocate_game_id(txn, &mut info)?;
            let deadline = self.next_deadline(txn.block_time())?;
            let mut game = Game::new(id, msg.black.clone(), msg.red.clone(), msg.wager, deadline);

            expiry_queue::append(txn, &mut info, &mut game)?;
            games::save_game(txn, &game)?;
            system_info::save(txn, &info)?;

            wager::settle(funds, &wager::escrow_plan(&game))?;

            let game_index = id.to_string();
            txn.emit(
                GameEvent::Created {
                    creator: msg.creator.clone(),
                    game_index: game_index.clone(),
                    black: msg.black.clone(),
                    red: msg.red.clone(),
                    wager: msg.wager,
                }
                .into_event(),
            );
            info!(game_index = %game_index, wager = msg.wager, deadline = %deadline, "Game created");

            Ok(MsgCreateGameResponse { game_index })
        })
    }
}
