// One-ply heuristic move selection over a cozy-chess board
pub mod board;
pub mod config;
pub mod error;
pub mod perft;
pub mod search;
pub mod selfplay;
pub mod timer;
pub mod uci;

pub use board::{GameBoard, Move};
pub use config::EngineConfig;
pub use error::EngineError;
pub use search::bot::Bot;
pub use timer::Timer;
