use cozy_chess::{
    get_bishop_moves, get_king_moves, get_knight_moves, get_pawn_attacks, get_rook_moves,
    Board as CozyBoard, Color, Piece, Square,
};

use super::{file_distance, GameBoard, Move};
use crate::error::{EngineError, Result};

pub(crate) fn opponent(color: Color) -> Color {
    if color == Color::White { Color::Black } else { Color::White }
}

/// cozy-chess board with a make/undo stack.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
    stack: Vec<(CozyBoard, Move)>,
}

impl Default for Position {
    fn default() -> Self { Self::startpos() }
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default(), stack: Vec::with_capacity(16) }
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        CozyBoard::from_fen(fen, false)
            .map(|b| Self { board: b, stack: Vec::with_capacity(16) })
            .map_err(|e| EngineError::Fen(format!("{e:?}")))
    }

    pub fn board(&self) -> &CozyBoard { &self.board }

    pub fn side_to_move(&self) -> Color { self.board.side_to_move() }

    pub fn fen(&self) -> String { format!("{}", self.board) }

    /// Number of simulated moves currently applied.
    pub fn depth(&self) -> usize { self.stack.len() }

    /// Describe a raw cozy-chess move in the context of this position.
    pub fn describe(&self, raw: cozy_chess::Move) -> Option<Move> {
        let us = self.board.side_to_move();
        let piece = self.board.piece_on(raw.from)?;
        let target = self.board.color_on(raw.to);
        let castle = piece == Piece::King
            && (target == Some(us) || file_distance(raw.from, raw.to) == 2);
        let en_passant = piece == Piece::Pawn && target.is_none() && raw.from.file() != raw.to.file();
        let capture = target == Some(opponent(us)) || en_passant;
        Some(Move { from: raw.from, to: raw.to, piece, capture, castle, promotion: raw.promotion })
    }

    /// Find the legal move matching a UCI string. Castling is accepted as
    /// either the king two-step (`e1g1`) or king-takes-rook (`e1h1`).
    pub fn find_move_uci(&self, mv_uci: &str) -> Option<Move> {
        self.legal_moves(false)
            .into_iter()
            .find(|m| m.to_string() == mv_uci || m.raw().to_string() == mv_uci)
    }

    /// Play a move permanently. It is not undoable through the stack.
    pub fn play_uci(&mut self, mv_uci: &str) -> Result<Move> {
        let mv = self.find_move_uci(mv_uci).ok_or_else(|| EngineError::IllegalMove(mv_uci.to_string()))?;
        self.board.play_unchecked(mv.raw());
        Ok(mv)
    }

    pub fn play(&mut self, mv: Move) -> Result<()> {
        if !self.board.is_legal(mv.raw()) {
            return Err(EngineError::IllegalMove(mv.to_string()));
        }
        self.board.play_unchecked(mv.raw());
        Ok(())
    }

    pub fn set_from_start_and_moves(moves: &[String]) -> Result<Self> {
        let mut pos = Self::startpos();
        for m in moves { pos.play_uci(m)?; }
        Ok(pos)
    }

    pub fn has_legal_moves(&self) -> bool {
        let mut any = false;
        self.board.generate_moves(|_| { any = true; true });
        any
    }

    pub fn halfmove_clock(&self) -> u8 { self.board.halfmove_clock() }
}

impl GameBoard for Position {
    fn legal_moves(&self, captures_only: bool) -> Vec<Move> {
        let mut out = Vec::with_capacity(48);
        self.board.generate_moves(|ml| {
            for raw in ml {
                if let Some(m) = self.describe(raw) {
                    if !captures_only || m.is_capture() { out.push(m); }
                }
            }
            false
        });
        out
    }

    fn in_check(&self) -> bool { !self.board.checkers().is_empty() }

    fn in_checkmate(&self) -> bool { self.in_check() && !self.has_legal_moves() }

    fn attacked_by_opponent(&self, square: Square) -> bool {
        let b = &self.board;
        let us = b.side_to_move();
        let theirs = b.colors(opponent(us));
        let occ = b.occupied();
        let diag = theirs & (b.pieces(Piece::Bishop) | b.pieces(Piece::Queen));
        let line = theirs & (b.pieces(Piece::Rook) | b.pieces(Piece::Queen));
        !(get_pawn_attacks(square, us) & theirs & b.pieces(Piece::Pawn)).is_empty()
            || !(get_knight_moves(square) & theirs & b.pieces(Piece::Knight)).is_empty()
            || !(get_king_moves(square) & theirs & b.pieces(Piece::King)).is_empty()
            || !(get_bishop_moves(square, occ) & diag).is_empty()
            || !(get_rook_moves(square, occ) & line).is_empty()
    }

    fn piece_at(&self, square: Square) -> Option<Piece> { self.board.piece_on(square) }

    fn ply_count(&self) -> u32 {
        let full = u32::from(self.board.fullmove_number().max(1));
        (full - 1) * 2 + u32::from(self.board.side_to_move() == Color::Black)
    }

    fn make_move(&mut self, mv: Move) -> Result<()> {
        if !self.board.is_legal(mv.raw()) {
            return Err(EngineError::IllegalMove(mv.to_string()));
        }
        let prev = self.board.clone();
        self.board.play_unchecked(mv.raw());
        self.stack.push((prev, mv));
        Ok(())
    }

    fn undo_move(&mut self, mv: Move) -> Result<()> {
        match self.stack.last() {
            Some((_, top)) if *top == mv => {}
            other => {
                return Err(EngineError::UndoMismatch { expected: other.map(|(_, m)| *m), got: mv });
            }
        }
        if let Some((prev, _)) = self.stack.pop() {
            self.board = prev;
        }
        Ok(())
    }
}
