use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{GameBoard, Move};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::search::repetition::RepetitionGuard;
use crate::search::scorer::{score_moves, Evaluation};
use crate::timer::Timer;

/// One-ply heuristic player. Keep one instance per side for the whole game.
pub struct Bot {
    cfg: EngineConfig,
    guard: RepetitionGuard,
    rng: SmallRng,
}

impl Default for Bot {
    fn default() -> Self { Self::new(EngineConfig::default()) }
}

impl Bot {
    pub fn new(cfg: EngineConfig) -> Self {
        let rng = match cfg.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_rng(cfg, rng)
    }

    pub fn with_rng(cfg: EngineConfig, rng: SmallRng) -> Self {
        let guard = RepetitionGuard::new(cfg.history_capacity);
        Self { cfg, guard, rng }
    }

    pub fn history(&self) -> &RepetitionGuard { &self.guard }

    /// Forget previous turns, e.g. on a new game.
    pub fn reset(&mut self) { self.guard.clear(); }

    /// Pick this turn's move. The timer is not consulted.
    pub fn decide<B: GameBoard + ?Sized>(&mut self, board: &mut B, _timer: &Timer) -> Result<Move> {
        let legal = board.legal_moves(false);
        if legal.is_empty() {
            return Err(EngineError::NoLegalMoves);
        }
        let selected = match score_moves(board, &legal, &self.cfg)? {
            Evaluation::Decisive(mv) => {
                info!("mate in one: {}", mv);
                mv
            }
            Evaluation::Scored(table) => {
                let (mv, score) = table.best().ok_or(EngineError::NoLegalMoves)?;
                info!("best {} score {}", mv, score);
                mv
            }
        };
        Ok(self.guard.filter(selected, &legal, &mut self.rng))
    }
}
