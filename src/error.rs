use thiserror::Error;

use crate::board::Move;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no legal moves in this position")]
    NoLegalMoves,

    #[error("capture rule applied to quiet move {0}")]
    NotACapture(Move),

    #[error("simulating {mv} left the board unbalanced (ply {before} -> {after})")]
    UnbalancedSimulation { mv: Move, before: u32, after: u32 },

    #[error("undo of {got} does not match last applied move {expected:?}")]
    UndoMismatch { expected: Option<Move>, got: Move },

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("FEN error: {0}")]
    Fen(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
