//! Move legality.
//!
//! The lifecycle service only depends on [`MoveEngine`]; [`StandardRules`] is
//! the engine the module ships with.

use super::board::{Board, Piece, Pos};
use super::player::Player;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
}

impl Move {
    pub const fn new(from: Pos, to: Pos) -> Self {
        Self { from, to }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    /// Side to move next; `None` once the game is decided.
    pub next_turn: Option<Player>,
    pub winner: Option<Player>,
    pub captured: Option<Pos>,
}

/// Deterministic, side-effect-free move legality engine.
pub trait MoveEngine {
    fn apply(&self, board: &Board, mv: Move, turn: Player) -> Result<MoveOutcome, DomainError>;
}

/// Plain checkers: diagonal steps, single jumps, crowning on the far row, no
/// forced captures. Loses the side left with no piece or no move.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules;

const DIAGONALS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

fn illegal(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::IllegalMove, detail)
}

impl StandardRules {
    /// Checks `mv` for `turn` without applying it. Returns the captured square, if any.
    fn check(board: &Board, mv: Move, turn: Player) -> Result<Option<Pos>, DomainError> {
        let piece = board
            .get(mv.from)
            .ok_or_else(|| illegal(format!("no piece at {}", mv.from)))?;
        if piece.owner != turn {
            return Err(illegal(format!("piece at {} is not yours", mv.from)));
        }
        if !mv.to.is_on_board() {
            return Err(illegal(format!("destination {} is off the board", mv.to)));
        }
        if board.get(mv.to).is_some() {
            return Err(illegal(format!("destination {} is occupied", mv.to)));
        }

        let dx = mv.to.x as i8 - mv.from.x as i8;
        let dy = mv.to.y as i8 - mv.from.y as i8;
        if dx.abs() != dy.abs() || dx == 0 {
            return Err(illegal(format!("{} to {} is not diagonal", mv.from, mv.to)));
        }
        if !piece.king && dy.signum() != turn.forward() {
            return Err(illegal("men cannot move backwards"));
        }

        match dx.abs() {
            1 => Ok(None),
            2 => {
                let mid = mv
                    .from
                    .offset(dx / 2, dy / 2)
                    .ok_or_else(|| illegal("jump leaves the board"))?;
                match board.get(mid) {
                    Some(jumped) if jumped.owner == turn.opponent() => Ok(Some(mid)),
                    _ => Err(illegal(format!("no opponent piece to capture at {mid}"))),
                }
            }
            _ => Err(illegal(format!("{} to {} is too far", mv.from, mv.to))),
        }
    }

    fn has_any_move(board: &Board, player: Player) -> bool {
        board.pieces_of(player).any(|(from, _)| {
            DIAGONALS.iter().any(|&(dx, dy)| {
                [1, 2].iter().any(|&step| {
                    from.offset(dx * step, dy * step)
                        .is_some_and(|to| Self::check(board, Move::new(from, to), player).is_ok())
                })
            })
        })
    }
}

impl MoveEngine for StandardRules {
    fn apply(&self, board: &Board, mv: Move, turn: Player) -> Result<MoveOutcome, DomainError> {
        let captured = Self::check(board, mv, turn)?;

        let mut next = board.clone();
        let mut piece = next.get(mv.from).unwrap_or(Piece::man(turn));
        if mv.to.y == turn.crowning_row() {
            piece.king = true;
        }
        next.set(mv.from, None);
        next.set(mv.to, Some(piece));
        if let Some(pos) = captured {
            next.set(pos, None);
        }

        let opponent = turn.opponent();
        let decided = next.count(opponent) == 0 || !Self::has_any_move(&next, opponent);
        let (next_turn, winner) = if decided {
            (None, Some(turn))
        } else {
            (Some(opponent), None)
        };

        Ok(MoveOutcome {
            board: next,
            next_turn,
            winner,
            captured,
        })
    }
}
