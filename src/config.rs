use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tunable weights and bookkeeping for the move selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Added to every castling move.
    pub castle_bonus: i32,
    /// Added to every move when the side to move is already in check. Off by default.
    pub check_penalty: Option<i32>,
    /// Added to a non-pawn move whose destination the opponent attacks.
    pub development_penalty: i32,
    /// Pawn-structure score for e2e4 on the first ply of the game.
    pub opening_bonus: i32,
    /// Bonus for giving check without mate, applied only when `use_tempo` is set.
    pub tempo_bonus: i32,
    pub use_tempo: bool,
    /// Moves kept for repetition checks (at least 1).
    pub history_capacity: usize,
    /// Seed for the repetition fallback; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            castle_bonus: 1000,
            check_penalty: None,
            development_penalty: -100,
            opening_bonus: 1000,
            tempo_bonus: 50,
            use_tempo: false,
            history_capacity: 8,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
