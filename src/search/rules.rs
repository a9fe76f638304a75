//! Per-move heuristic contributions.
//!
//! Each rule looks at the current position and one candidate move. Rules that
//! need the resulting position go through [`simulate`], so the board is back
//! in its original state whenever they return.

use cozy_chess::{Piece, Square};

use crate::board::{simulate, GameBoard, Move};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::search::eval::piece_value;

/// Castling bonus, plus the optional penalty for moving while in check.
pub fn king_safety<B: GameBoard + ?Sized>(board: &B, mv: &Move, cfg: &EngineConfig) -> i32 {
    if mv.is_castle() {
        return cfg.castle_bonus;
    }
    match cfg.check_penalty {
        Some(penalty) if board.in_check() => penalty,
        _ => 0,
    }
}

/// Material won by a capture, assuming one immediate recapture when the
/// destination is defended.
pub fn capture<B: GameBoard + ?Sized>(board: &B, mv: &Move) -> Result<i32> {
    if !mv.is_capture() {
        return Err(EngineError::NotACapture(*mv));
    }
    // an empty destination on a capture is en passant
    let victim = board.piece_at(mv.to).unwrap_or(Piece::Pawn);
    let gain = piece_value(victim);
    if board.attacked_by_opponent(mv.to) {
        Ok(gain - piece_value(mv.piece))
    } else {
        Ok(gain)
    }
}

/// Penalty for putting a non-pawn piece on an attacked square.
pub fn development<B: GameBoard + ?Sized>(board: &B, mv: &Move, cfg: &EngineConfig) -> i32 {
    let hanging = if board.attacked_by_opponent(mv.landing()) { cfg.development_penalty } else { 0 };
    hanging + centralization(mv)
}

/// Stub: centre control is not scored yet.
fn centralization(_mv: &Move) -> i32 { 0 }

pub fn is_king_pawn_double_step(mv: &Move) -> bool {
    mv.piece == Piece::Pawn
        && ((mv.from == Square::E2 && mv.to == Square::E4) || (mv.from == Square::E7 && mv.to == Square::E5))
}

/// Opening bonus for 1.e4, otherwise the number of captures available to the
/// opponent after the pawn move.
pub fn pawn_structure<B: GameBoard + ?Sized>(board: &mut B, mv: &Move, cfg: &EngineConfig) -> Result<i32> {
    if board.ply_count() == 0 && is_king_pawn_double_step(mv) {
        return Ok(cfg.opening_bonus);
    }
    let captures = simulate(board, *mv, |after| after.legal_moves(true).len())?;
    Ok(i32::try_from(captures).unwrap_or(i32::MAX))
}

pub fn delivers_mate<B: GameBoard + ?Sized>(board: &mut B, mv: &Move) -> Result<bool> {
    simulate(board, *mv, |after| after.in_checkmate())
}

/// Bonus for a checking move that does not mate.
pub fn tempo<B: GameBoard + ?Sized>(board: &mut B, mv: &Move, cfg: &EngineConfig) -> Result<i32> {
    let checks = simulate(board, *mv, |after| after.in_check() && !after.in_checkmate())?;
    Ok(if checks { cfg.tempo_bonus } else { 0 })
}
