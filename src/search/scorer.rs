use log::debug;

use crate::board::{GameBoard, Move};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::search::rules;

/// Accumulated scores for one turn, in move generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTable {
    entries: Vec<(Move, i32)>,
}

impl ScoreTable {
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn entries(&self) -> &[(Move, i32)] { &self.entries }

    pub fn get(&self, mv: &Move) -> Option<i32> {
        self.entries.iter().find(|(m, _)| m == mv).map(|&(_, s)| s)
    }

    /// Highest score; the earliest entry wins ties.
    pub fn best(&self) -> Option<(Move, i32)> {
        self.entries.iter().copied().fold(None, |best, (mv, score)| match best {
            Some((_, top)) if score <= top => best,
            _ => Some((mv, score)),
        })
    }

    fn push(&mut self, mv: Move, score: i32) { self.entries.push((mv, score)); }
}

/// Outcome of scoring a turn's candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// This move mates; remaining candidates were not scored.
    Decisive(Move),
    Scored(ScoreTable),
}

/// Sum of the rules that apply to `mv`. Mate detection is handled by the caller.
pub fn score_move<B: GameBoard + ?Sized>(board: &mut B, mv: &Move, cfg: &EngineConfig) -> Result<i32> {
    let mut score = rules::king_safety(board, mv, cfg);
    if mv.is_capture() {
        score += rules::capture(board, mv)?;
    }
    score += if mv.is_pawn() {
        rules::pawn_structure(board, mv, cfg)?
    } else {
        rules::development(board, mv, cfg)
    };
    if cfg.use_tempo {
        score += rules::tempo(board, mv, cfg)?;
    }
    Ok(score)
}

/// Score every candidate, stopping at the first one that delivers mate.
pub fn score_moves<B: GameBoard + ?Sized>(board: &mut B, moves: &[Move], cfg: &EngineConfig) -> Result<Evaluation> {
    let mut table = ScoreTable { entries: Vec::with_capacity(moves.len()) };
    for mv in moves {
        if rules::delivers_mate(board, mv)? {
            return Ok(Evaluation::Decisive(*mv));
        }
        let score = score_move(board, mv, cfg)?;
        debug!("score {} = {}", mv, score);
        table.push(*mv, score);
    }
    Ok(Evaluation::Scored(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::cozy::Position;
    use cozy_chess::{Piece, Square};

    fn quiet(from: Square, to: Square) -> Move {
        Move { from, to, piece: Piece::Knight, capture: false, castle: false, promotion: None }
    }

    #[test]
    fn best_prefers_first_of_equal_scores() {
        let a = quiet(Square::B1, Square::C3);
        let b = quiet(Square::G1, Square::F3);
        let c = quiet(Square::B1, Square::A3);
        let table = ScoreTable { entries: vec![(c, -5), (a, 10), (b, 10)] };
        assert_eq!(table.best(), Some((a, 10)));
        assert_eq!(ScoreTable::default().best(), None);
    }

    #[test]
    fn every_startpos_move_gets_one_entry() {
        let mut pos = Position::startpos();
        let moves = pos.legal_moves(false);
        let Evaluation::Scored(table) = score_moves(&mut pos, &moves, &EngineConfig::default()).unwrap() else {
            panic!("no mate from the start position");
        };
        assert_eq!(table.len(), moves.len());
        for (entry, mv) in table.entries().iter().zip(&moves) {
            assert_eq!(entry.0, *mv);
        }
        let e4 = pos.find_move_uci("e2e4").unwrap();
        assert_eq!(table.get(&e4), Some(EngineConfig::default().opening_bonus));
    }

    fn summed_rules(pos: &mut Position, mv: &Move, cfg: &EngineConfig) -> i32 {
        let mut sum = rules::king_safety(&*pos, mv, cfg);
        if mv.is_capture() {
            sum += rules::capture(&*pos, mv).unwrap();
        }
        sum + if mv.is_pawn() { rules::pawn_structure(pos, mv, cfg).unwrap() } else { rules::development(&*pos, mv, cfg) }
    }

    #[test]
    fn capture_entries_equal_the_sum_of_their_rules() {
        let cfg = EngineConfig::default();
        let fens = [
            "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
            "4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 10",
        ];
        let (mut piece_caps, mut pawn_caps) = (0, 0);
        for fen in fens {
            let mut pos = Position::from_fen(fen).unwrap();
            let moves = pos.legal_moves(false);
            let Evaluation::Scored(table) = score_moves(&mut pos, &moves, &cfg).unwrap() else {
                panic!("no mate in {fen}");
            };
            assert!(!table.is_empty());
            for mv in &moves {
                assert_eq!(table.get(mv), Some(summed_rules(&mut pos, mv, &cfg)), "{mv} in {fen}");
                if mv.is_capture() {
                    if mv.is_pawn() { pawn_caps += 1 } else { piece_caps += 1 }
                }
            }
        }
        assert!(piece_caps >= 2 && pawn_caps >= 2);

        // Nxe5 runs into Nc6: 100 - 300 for the trade, -100 for the attacked square
        let mut pos = Position::from_fen(fens[0]).unwrap();
        let nxe5 = pos.find_move_uci("f3e5").unwrap();
        assert_eq!(score_move(&mut pos, &nxe5, &cfg).unwrap(), -300);
        // en passant and exd5 win a pawn and leave black nothing to take
        let mut pos = Position::from_fen(fens[1]).unwrap();
        let ep = pos.find_move_uci("e5d6").unwrap();
        assert_eq!(score_move(&mut pos, &ep, &cfg).unwrap(), 100);
        let mut pos = Position::from_fen(fens[2]).unwrap();
        let exd5 = pos.find_move_uci("e4d5").unwrap();
        assert_eq!(score_move(&mut pos, &exd5, &cfg).unwrap(), 100);
    }

    #[test]
    fn mate_short_circuits_before_later_moves() {
        let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let ra8 = pos.find_move_uci("a1a8").unwrap();
        let kf1 = pos.find_move_uci("g1f1").unwrap();
        let eval = score_moves(&mut pos, &[ra8, kf1], &EngineConfig::default()).unwrap();
        assert_eq!(eval, Evaluation::Decisive(ra8));
        assert_eq!(pos.depth(), 0);
    }
}
