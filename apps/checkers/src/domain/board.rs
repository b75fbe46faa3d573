//! Board representation and its stored string form.
//!
//! The stored form is eight rows joined by `|`, row 0 first, one character
//! per cell: `*` empty, `b`/`r` men, `B`/`R` kings.

use std::fmt;
use std::str::FromStr;

use super::player::Player;
use crate::errors::domain::{DomainError, ValidationKind};

pub const BOARD_SIZE: u8 = 8;
const ROW_SEPARATOR: char = '|';
const EMPTY_CELL: char = '*';

pub const STARTING_BOARD: &str =
    "*b*b*b*b|b*b*b*b*|*b*b*b*b|********|********|r*r*r*r*|*r*r*r*r|r*r*r*r*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: u8,
    pub y: u8,
}

impl Pos {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Build a position from wire coordinates, rejecting anything off-board.
    pub fn from_coords(x: u64, y: u64) -> Option<Self> {
        if x < BOARD_SIZE as u64 && y < BOARD_SIZE as u64 {
            Some(Self::new(x as u8, y as u8))
        } else {
            None
        }
    }

    pub fn is_on_board(&self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// Step by `(dx, dy)`, returning `None` when leaving the board.
    pub fn offset(&self, dx: i8, dy: i8) -> Option<Self> {
        let x = i16::from(self.x) + i16::from(dx);
        let y = i16::from(self.y) + i16::from(dy);
        let size = i16::from(BOARD_SIZE);
        if (0..size).contains(&x) && (0..size).contains(&y) {
            Some(Self::new(x as u8, y as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub owner: Player,
    pub king: bool,
}

impl Piece {
    pub const fn man(owner: Player) -> Self {
        Self { owner, king: false }
    }

    pub const fn king(owner: Player) -> Self {
        Self { owner, king: true }
    }

    fn to_char(self) -> char {
        match (self.owner, self.king) {
            (Player::Black, false) => 'b',
            (Player::Black, true) => 'B',
            (Player::Red, false) => 'r',
            (Player::Red, true) => 'R',
        }
    }

    fn from_char(c: char) -> Option<Option<Self>> {
        match c {
            EMPTY_CELL => Some(None),
            'b' => Some(Some(Piece::man(Player::Black))),
            'B' => Some(Some(Piece::king(Player::Black))),
            'r' => Some(Some(Piece::man(Player::Red))),
            'R' => Some(Some(Piece::king(Player::Red))),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    // cells[y][x]
    cells: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    pub fn starting() -> Self {
        let mut board = Self::empty();
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                if (x + y) % 2 == 0 {
                    continue;
                }
                if y < 3 {
                    board.set(Pos::new(x, y), Some(Piece::man(Player::Black)));
                } else if y > 4 {
                    board.set(Pos::new(x, y), Some(Piece::man(Player::Red)));
                }
            }
        }
        board
    }

    /// Piece at `pos`; off-board positions are always empty.
    pub fn get(&self, pos: Pos) -> Option<Piece> {
        self.cells
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
            .copied()
            .flatten()
    }

    /// Place or clear a piece. Writes to off-board positions are ignored.
    pub fn set(&mut self, pos: Pos, piece: Option<Piece>) {
        if let Some(cell) = self
            .cells
            .get_mut(pos.y as usize)
            .and_then(|row| row.get_mut(pos.x as usize))
        {
            *cell = piece;
        }
    }

    /// Positions holding a piece of `owner`, row-major.
    pub fn pieces_of(&self, owner: Player) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        (0..BOARD_SIZE).flat_map(move |y| {
            (0..BOARD_SIZE).filter_map(move |x| {
                let pos = Pos::new(x, y);
                self.get(pos)
                    .filter(|piece| piece.owner == owner)
                    .map(|piece| (pos, piece))
            })
        })
    }

    pub fn count(&self, owner: Player) -> usize {
        self.pieces_of(owner).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.iter().enumerate() {
            if y > 0 {
                write!(f, "{ROW_SEPARATOR}")?;
            }
            for cell in row {
                let c = cell.map_or(EMPTY_CELL, Piece::to_char);
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split(ROW_SEPARATOR).collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(DomainError::validation(
                ValidationKind::InvalidBoard,
                format!("expected {BOARD_SIZE} rows, got {}", rows.len()),
            ));
        }
        let mut board = Board::empty();
        for (y, row) in rows.iter().enumerate() {
            let cells: Vec<char> = row.chars().collect();
            if cells.len() != BOARD_SIZE as usize {
                return Err(DomainError::validation(
                    ValidationKind::InvalidBoard,
                    format!("row {y} has {} cells", cells.len()),
                ));
            }
            for (x, c) in cells.into_iter().enumerate() {
                let piece = Piece::from_char(c).ok_or_else(|| {
                    DomainError::validation(
                        ValidationKind::InvalidBoard,
                        format!("unknown cell {c:?} at ({x}, {y})"),
                    )
                })?;
                board.set(Pos::new(x as u8, y as u8), piece);
            }
        }
        Ok(board)
    }
}
