use std::collections::VecDeque;

use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Move;

/// Remembers the bot's own recent moves and swaps in a random legal move
/// when the selector is about to repeat the previous one.
#[derive(Debug, Clone)]
pub struct RepetitionGuard {
    recent: VecDeque<Move>,
    capacity: usize,
    turns: u64,
}

impl RepetitionGuard {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { recent: VecDeque::with_capacity(capacity), capacity, turns: 0 }
    }

    /// Armed once at least two turns have been recorded.
    pub fn is_armed(&self) -> bool { self.turns >= 2 }

    pub fn last(&self) -> Option<&Move> { self.recent.back() }

    pub fn turns(&self) -> u64 { self.turns }

    /// Oldest first.
    pub fn recent(&self) -> impl Iterator<Item = &Move> { self.recent.iter() }

    pub fn clear(&mut self) {
        self.recent.clear();
        self.turns = 0;
    }

    /// Accept `selected` or replace it with a uniform pick from `legal`, then
    /// record the final choice.
    pub fn filter<R: Rng + ?Sized>(&mut self, selected: Move, legal: &[Move], rng: &mut R) -> Move {
        let mut chosen = selected;
        if self.is_armed() && self.last() == Some(&selected) {
            if let Some(&alt) = legal.choose(rng) {
                warn!("repeating {}, playing random {} instead", selected, alt);
                chosen = alt;
            }
        }
        self.record(chosen);
        chosen
    }

    fn record(&mut self, mv: Move) {
        if self.recent.len() == self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(mv);
        self.turns += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cozy_chess::{Piece, Square};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn knight(from: Square, to: Square) -> Move {
        Move { from, to, piece: Piece::Knight, capture: false, castle: false, promotion: None }
    }

    #[test]
    fn idle_guard_accepts_repeats() {
        let mut guard = RepetitionGuard::new(4);
        let mut rng = SmallRng::seed_from_u64(1);
        let a = knight(Square::G1, Square::F3);
        let b = knight(Square::B1, Square::C3);
        assert_eq!(guard.filter(a, &[a, b], &mut rng), a);
        assert_eq!(guard.filter(a, &[a, b], &mut rng), a);
        assert!(guard.is_armed());
    }

    #[test]
    fn armed_guard_replaces_repeat_and_records_replacement() {
        let legal: Vec<Move> = [Square::A3, Square::C3, Square::D2]
            .into_iter()
            .map(|to| knight(Square::B1, to))
            .collect();
        let a = legal[0];
        let run = |seed: u64| {
            let mut guard = RepetitionGuard::new(4);
            let mut rng = SmallRng::seed_from_u64(seed);
            guard.filter(legal[1], &legal, &mut rng);
            guard.filter(a, &legal, &mut rng);
            let out = guard.filter(a, &legal, &mut rng);
            (out, guard.last().copied(), guard.turns())
        };
        let (out, last, turns) = run(42);
        assert!(legal.contains(&out));
        assert_eq!(last, Some(out));
        assert_eq!(turns, 3);
        assert_eq!(run(42).0, out, "seeded fallback must be reproducible");
    }

    #[test]
    fn history_is_bounded() {
        let mut guard = RepetitionGuard::new(2);
        let mut rng = SmallRng::seed_from_u64(0);
        let moves = [knight(Square::B1, Square::A3), knight(Square::B1, Square::C3), knight(Square::G1, Square::F3)];
        for mv in moves {
            guard.filter(mv, &moves, &mut rng);
        }
        let kept: Vec<Move> = guard.recent().copied().collect();
        assert_eq!(kept, vec![moves[1], moves[2]]);
        assert_eq!(guard.turns(), 3);
    }
}
