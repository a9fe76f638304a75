//! Board collaborator surface consumed by the move selector.
//!
//! The selector never looks inside a board; it asks the questions on
//! [`GameBoard`] and simulates candidates through [`simulate`], which keeps
//! every make paired with its undo.

pub mod cozy;

use std::fmt;
use std::hash::{Hash, Hasher};

use cozy_chess::{File, Piece, Square};

use crate::error::{EngineError, Result};

/// A legal move as seen by the heuristics.
///
/// Two moves are equal when origin, destination and promotion agree; the
/// remaining fields are derived from the position the move was generated in.
#[derive(Clone, Copy, Debug)]
pub struct Move {
    pub from: Square,
    /// Destination in board encoding. For castling this is the rook square.
    pub to: Square,
    pub piece: Piece,
    pub capture: bool,
    pub castle: bool,
    pub promotion: Option<Piece>,
}

impl Move {
    pub fn is_capture(&self) -> bool { self.capture }
    pub fn is_castle(&self) -> bool { self.castle }
    pub fn is_pawn(&self) -> bool { self.piece == Piece::Pawn }

    /// Square the moving piece lands on (king destination for castling).
    pub fn landing(&self) -> Square {
        if !self.castle || file_distance(self.from, self.to) == 2 {
            return self.to;
        }
        let file = if (self.to.file() as usize) > (self.from.file() as usize) { File::G } else { File::C };
        Square::new(file, self.from.rank())
    }

    pub(crate) fn raw(&self) -> cozy_chess::Move {
        cozy_chess::Move { from: self.from, to: self.to, promotion: self.promotion }
    }
}

pub(crate) fn file_distance(a: Square, b: Square) -> usize {
    (a.file() as usize).abs_diff(b.file() as usize)
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.promotion.hash(state);
    }
}

// UCI notation, castling as king two-step
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.landing())?;
        if let Some(p) = self.promotion {
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

/// Capability surface of the external board.
///
/// `make_move`/`undo_move` must be called in strictly nested pairs.
pub trait GameBoard {
    /// Legal moves for the side to move, in generation order.
    fn legal_moves(&self, captures_only: bool) -> Vec<Move>;
    fn in_check(&self) -> bool;
    fn in_checkmate(&self) -> bool;
    /// True when the opponent of the side to move attacks `square`.
    fn attacked_by_opponent(&self, square: Square) -> bool;
    fn piece_at(&self, square: Square) -> Option<Piece>;
    /// Half-moves since the game started.
    fn ply_count(&self) -> u32;
    fn make_move(&mut self, mv: Move) -> Result<()>;
    fn undo_move(&mut self, mv: Move) -> Result<()>;
}

/// Apply `mv`, run `inspect` on the resulting position, then take `mv` back.
///
/// The closure only gets a shared borrow, so no second simulation can start
/// while this one is in flight.
pub fn simulate<B, T>(board: &mut B, mv: Move, inspect: impl FnOnce(&B) -> T) -> Result<T>
where
    B: GameBoard + ?Sized,
{
    let before = board.ply_count();
    board.make_move(mv)?;
    let out = inspect(&*board);
    board.undo_move(mv)?;
    let after = board.ply_count();
    if after != before {
        return Err(EngineError::UnbalancedSimulation { mv, before, after });
    }
    Ok(out)
}
