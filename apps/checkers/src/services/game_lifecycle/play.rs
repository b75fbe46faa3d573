use tracing::{debug, info};

use super::{parse_game_index, GameLifecycleService};
use crate::domain::player::player_or_none_str;
use crate::domain::{GameEvent, Move, MoveEngine, Pos};
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::infra::txn::with_txn;
use crate::infra::{Context, FundsLedger};
use crate::protocol::{MsgPlayMove, MsgPlayMoveResponse, NO_CAPTURE};
use crate::repos::games::{self, pot};
use crate::repos::system_info;
use crate::services::{expiry_queue, wager};

impl<E: MoveEngine> GameLifecycleService<E> {
    /// Play one move for the side whose turn it is.
    ///
    /// A continuing game gets a fresh deadline and goes to the back of the
    /// expiry queue; a decided game leaves the queue and its pot is paid out.
    pub fn play_move(
        &self,
        ctx: &mut Context<'_>,
        funds: &mut dyn FundsLedger,
        msg: &MsgPlayMove,
    ) -> Result<MsgPlayMoveResponse, AppError> {
        debug!(
            creator = %msg.creator,
            game_index = %msg.game_index,
            from = ?(msg.from_x, msg.from_y),
            to = ?(msg.to_x, msg.to_y),
            "Playing move"
        );

        with_txn(ctx, |txn| {
            txn.consume_gas(self.params.gas.play_move, "Play a move")?;

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
            let turn = game.turn.ok_or_else(|| {
                DomainError::data_corruption(format!("active game {id} has no turn"))
            })?;
            if side != turn {
                return Err(DomainError::validation(
                    ValidationKind::WrongTurn,
                    format!("player tried to play out of turn: {}", side.color()),
                )
                .into());
            }

            let from = Pos::from_coords(msg.from_x, msg.from_y);
            let to = Pos::from_coords(msg.to_x, msg.to_y);
            let (Some(from), Some(to)) = (from, to) else {
                return Err(DomainError::validation(
                    ValidationKind::IllegalMove,
                    "coordinates are off the board",
                )
                .into());
            };

            let outcome = self.engine.apply(&game.board, Move::new(from, to), turn)?;
            let (captured_x, captured_y) = outcome
                .captured
                .map_or((NO_CAPTURE, NO_CAPTURE), |p| (p.x as i64, p.y as i64));

            game.board = outcome.board;
            game.move_count = game.move_count.checked_add(1).ok_or_else(|| {
                DomainError::infra(InfraErrorKind::Overflow, format!("move count of game {id}"))
            })?;

            let mut info = system_info::require(txn)?;
            let board = game.board.to_string();
            let game_index = id.to_string();

            match (outcome.winner, outcome.next_turn) {
                (Some(winner), _) => {
                    let payout = pot(game.wager)?;
                    self.conclude(txn, &mut info, &mut game, winner)?;
                    let winner_account = game.account_of(winner).to_string();
                    wager::settle(funds, &wager::payout_plan(&game, &winner_account)?)?;

                    txn.emit(
                        GameEvent::Won {
                            creator: msg.creator.clone(),
                            game_index,
                            captured_x,
                            captured_y,
                            winner: winner.as_str().to_string(),
                            board,
                            payout,
                        }
                        .into_event(),
                    );
                    info!(game_index = %id, winner = %winner_account, payout, "Game won");
                }
                (None, Some(next_turn)) => {
                    game.turn = Some(next_turn);
                    game.deadline = self.next_deadline(txn.block_time())?;
                    expiry_queue::move_to_tail(txn, &mut info, &mut game)?;
                    games::save_game(txn, &game)?;
                    system_info::save(txn, &info)?;

                    txn.emit(
                        GameEvent::MovePlayed {
                            creator: msg.creator.clone(),
                            game_index,
                            captured_x,
                            captured_y,
                            winner: player_or_none_str(None).to_string(),
                            board,
                        }
                        .into_event(),
                    );
                    info!(game_index = %id, player = %msg.creator, deadline = %game.deadline, "Move played");
                }
                (None, None) => {
                    return Err(DomainError::infra(
                        InfraErrorKind::Other("ENGINE".into()),
                        "move engine reported neither a next turn nor a winner",
                    )
                    .into());
                }
            }

            Ok(MsgPlayMoveResponse {
                captured_x,
                captured_y,
                winner: player_or_none_str(outcome.winner).to_string(),
            })
        })
    }
}
