//! Deadline-ordered queue threaded through the game records themselves.
//!
//! The queue ends live in [`SystemInfo`]; each linked [`Game`] carries its
//! `prev`/`next` neighbours. Every operation touches at most the two
//! neighbours of the game being moved, and every operation checks the links it
//! relies on. A mismatch is reported as a queue inconsistency and never
//! repaired.
//!
//! Callers own the `SystemInfo` and the game being (un)linked and persist both
//! afterwards; neighbour records are loaded and saved here.

use time::OffsetDateTime;
use tracing::error;

use crate::errors::domain::DomainError;
use crate::infra::Context;
use crate::repos::games::{self, require_linked, Game, GameId};
use crate::repos::SystemInfo;

fn inconsistent(detail: String) -> DomainError {
    error!(detail = %detail, "expiry queue inconsistency");
    DomainError::queue_inconsistency(detail)
}

/// Whether `game` currently sits in the queue.
pub fn is_linked(info: &SystemInfo, game: &Game) -> bool {
    game.prev.is_some() || game.next.is_some() || info.fifo_head == Some(game.id)
}

/// Link `game` as the new tail.
pub fn append(
    ctx: &mut Context<'_>,
    info: &mut SystemInfo,
    game: &mut Game,
) -> Result<(), DomainError> {
    if is_linked(info, game) {
        return Err(inconsistent(format!("game {} is already queued", game.id)));
    }

    match info.fifo_tail {
        None => {
            if info.fifo_head.is_some() {
                return Err(inconsistent("queue has a head but no tail".to_string()));
            }
            info.fifo_head = Some(game.id);
        }
        Some(tail_id) => {
            let mut tail = require_linked(ctx, tail_id)?;
            if tail.next.is_some() {
                return Err(inconsistent(format!(
                    "tail {tail_id} links forward to {}",
                    games::link_to_str(tail.next)
                )));
            }
            tail.next = Some(game.id);
            games::save_game(ctx, &tail)?;
            game.prev = Some(tail_id);
        }
    }

    game.next = None;
    info.fifo_tail = Some(game.id);
    Ok(())
}

/// Unlink `game` from wherever it sits, patching its neighbours and the queue ends.
pub fn remove(
    ctx: &mut Context<'_>,
    info: &mut SystemInfo,
    game: &mut Game,
) -> Result<(), DomainError> {
    let id = game.id;
    if !is_linked(info, game) {
        return Err(inconsistent(format!("game {id} is not queued")));
    }

    match game.prev {
        None => {
            if info.fifo_head != Some(id) {
                return Err(inconsistent(format!(
                    "game {id} has no predecessor but head is {}",
                    games::link_to_str(info.fifo_head)
                )));
            }
            info.fifo_head = game.next;
        }
        Some(prev_id) => {
            let mut prev = require_linked(ctx, prev_id)?;
            if prev.next != Some(id) {
                return Err(inconsistent(format!(
                    "game {prev_id} precedes {id} but links forward to {}",
                    games::link_to_str(prev.next)
                )));
            }
            prev.next = game.next;
            games::save_game(ctx, &prev)?;
        }
    }

    match game.next {
        None => {
            if info.fifo_tail != Some(id) {
                return Err(inconsistent(format!(
                    "game {id} has no successor but tail is {}",
                    games::link_to_str(info.fifo_tail)
                )));
            }
            info.fifo_tail = game.prev;
        }
        Some(next_id) => {
            let mut next = require_linked(ctx, next_id)?;
            if next.prev != Some(id) {
                return Err(inconsistent(format!(
                    "game {next_id} follows {id} but links back to {}",
                    games::link_to_str(next.prev)
                )));
            }
            next.prev = game.prev;
            games::save_game(ctx, &next)?;
        }
    }

    game.prev = None;
    game.next = None;
    Ok(())
}

/// Used whenever a game's deadline is refreshed.
pub fn move_to_tail(
    ctx: &mut Context<'_>,
    info: &mut SystemInfo,
    game: &mut Game,
) -> Result<(), DomainError> {
    remove(ctx, info, game)?;
    append(ctx, info, game)
}

/// Walk the front of the queue yielding games whose deadline passed before `now`.
///
/// Stops at the first live game. The walk follows the links as they are when
/// each step is taken; callers that mutate the queue between steps should
/// start a new walk instead of resuming this one.
pub fn front_expired<'c, 's>(
    ctx: &'c mut Context<'s>,
    info: &SystemInfo,
    now: OffsetDateTime,
) -> FrontExpired<'c, 's> {
    FrontExpired {
        ctx,
        cursor: info.fifo_head,
        now,
        expected_prev: None,
    }
}

pub struct FrontExpired<'c, 's> {
    ctx: &'c mut Context<'s>,
    cursor: Option<GameId>,
    now: OffsetDateTime,
    expected_prev: Option<GameId>,
}

impl Iterator for FrontExpired<'_, '_> {
    type Item = Result<Game, DomainError>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor.take()?;
        let game = match require_linked(self.ctx, id) {
            Ok(game) => game,
            Err(e) => return Some(Err(e)),
        };
        if game.prev != self.expected_prev {
            return Some(Err(inconsistent(format!(
                "game {id} links back to {} during walk",
                games::link_to_str(game.prev)
            ))));
        }
        if !game.is_expired(self.now) {
            return None;
        }
        self.expected_prev = Some(id);
        self.cursor = game.next;
        Some(Ok(game))
    }
}
