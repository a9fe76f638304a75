//! Bot-vs-bot (or bot-vs-random) game driver.
//!
//! Every game owns its position and players, so games can run on a rayon
//! pool without sharing a board.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use cozy_chess::Color;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::board::cozy::Position;
use crate::board::{GameBoard, Move};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::search::bot::Bot;
use crate::timer::Timer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opponent {
    Bot,
    Random,
}

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_plies: usize,
    pub threads: usize,
    pub seed: u64,
    /// Who plays black; white is always the bot.
    pub opponent: Opponent,
    pub openings_path: Option<PathBuf>, // optional FEN/EPD list, one per line
    pub engine: EngineConfig,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self {
            games: 1,
            max_plies: 200,
            threads: 1,
            seed: 42,
            opponent: Opponent::Bot,
            openings_path: None,
            engine: EngineConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    Checkmate,
    Stalemate,
    FiftyMoves,
    MaxPlies,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub start_fen: String,
    pub moves: Vec<String>,
    pub result: i8, // 1 white win, 0 draw, -1 black win
    pub termination: Termination,
}

enum Player {
    Bot(Bot),
    Random(SmallRng),
}

impl Player {
    fn choose(&mut self, pos: &mut Position, timer: &Timer) -> Result<Move> {
        match self {
            Player::Bot(bot) => bot.decide(pos, timer),
            Player::Random(rng) => pos.legal_moves(false).choose(rng).copied().ok_or(EngineError::NoLegalMoves),
        }
    }
}

fn terminal(pos: &Position) -> Option<(Termination, i8)> {
    if !pos.has_legal_moves() {
        if !pos.in_check() {
            return Some((Termination::Stalemate, 0));
        }
        let result = if pos.side_to_move() == Color::White { -1 } else { 1 };
        return Some((Termination::Checkmate, result));
    }
    if pos.halfmove_clock() >= 100 {
        return Some((Termination::FiftyMoves, 0));
    }
    None
}

/// Play one game from `start`. Seeds are derived from `seed` so a game is
/// reproducible regardless of which thread runs it.
pub fn play_game(start: Position, params: &SelfPlayParams, seed: u64) -> Result<GameRecord> {
    let mut pos = start;
    let start_fen = pos.fen();
    let mut white = Player::Bot(Bot::new(params.engine.clone().with_seed(seed)));
    let mut black = match params.opponent {
        Opponent::Bot => Player::Bot(Bot::new(params.engine.clone().with_seed(seed.rotate_left(17) ^ 1))),
        Opponent::Random => Player::Random(SmallRng::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15)),
    };
    let mut moves = Vec::new();
    let (termination, result) = loop {
        if let Some(end) = terminal(&pos) { break end; }
        if moves.len() >= params.max_plies { break (Termination::MaxPlies, 0); }
        let timer = Timer::unlimited();
        let player = if pos.side_to_move() == Color::White { &mut white } else { &mut black };
        let mv = player.choose(&mut pos, &timer)?;
        pos.play(mv)?;
        moves.push(mv.to_string());
    };
    debug!("game over after {} plies: {:?} {}", moves.len(), termination, result);
    Ok(GameRecord { start_fen, moves, result, termination })
}

/// Play `params.games` games on a pool of `params.threads`. Game `i` uses seed
/// `params.seed + i` for its players and its opening, so the records do not
/// depend on the thread count or on how the games are batched.
pub fn generate_games(params: &SelfPlayParams) -> Result<Vec<GameRecord>> {
    let openings = load_openings(params)?;
    let jobs: Vec<(Position, u64)> = (0..params.games)
        .map(|gi| {
            let seed = params.seed.wrapping_add(gi as u64);
            (pick_opening(&openings, seed), seed)
        })
        .collect();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(params.threads.max(1))
        .build()?;
    let games = pool.install(|| {
        jobs.into_par_iter()
            .map(|(start, seed)| play_game(start, params, seed))
            .collect::<Result<Vec<_>>>()
    })?;
    info!("generated {} games", games.len());
    Ok(games)
}

fn pick_opening(openings: &[Position], seed: u64) -> Position {
    if openings.is_empty() {
        return Position::startpos();
    }
    let mut rng = SmallRng::seed_from_u64(seed ^ 0x5851_f42d_4c95_7f2d);
    openings[rng.gen_range(0..openings.len())].clone()
}

/// Parse the openings file, one FEN or EPD per line. No path means no
/// openings; a path that cannot be read is an error. Lines that do not parse
/// are skipped.
pub fn load_openings(params: &SelfPlayParams) -> Result<Vec<Position>> {
    let mut out = Vec::new();
    let Some(ref p) = params.openings_path else { return Ok(out) };
    let s = std::fs::read_to_string(p)?;
    for line in s.lines() {
        let raw = line.trim();
        if raw.is_empty() || raw.starts_with('#') { continue; }
        // EPD carries 4 fields; pad halfmove/fullmove
        let parts: Vec<&str> = raw.split_whitespace().collect();
        let fen = if parts.len() >= 6 {
            parts[0..6].join(" ")
        } else if parts.len() >= 4 {
            format!("{} 0 1", parts[0..4].join(" "))
        } else { raw.to_string() };
        match Position::from_fen(&fen) {
            Ok(pos) => out.push(pos),
            Err(e) => debug!("skipping opening '{raw}': {e}"),
        }
    }
    info!("loaded {} openings from {}", out.len(), p.display());
    Ok(out)
}

/// One JSON record per line.
pub fn write_jsonl<P: AsRef<Path>>(games: &[GameRecord], path: P) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for g in games {
        serde_json::to_writer(&mut w, g)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<GameRecord>> {
    let rdr = BufReader::new(File::open(path)?);
    let mut out = Vec::new();
    for line in rdr.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        out.push(serde_json::from_str(&line)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mated_side_loses() {
        let moves: Vec<String> = ["f2f3", "e7e5", "g2g4", "d8h4"].iter().map(|s| s.to_string()).collect();
        let pos = Position::set_from_start_and_moves(&moves).unwrap();
        assert_eq!(terminal(&pos), Some((Termination::Checkmate, -1)));
        assert_eq!(terminal(&Position::startpos()), None);
    }

    #[test]
    fn game_stops_at_ply_limit() {
        let params = SelfPlayParams { max_plies: 6, ..SelfPlayParams::default() };
        let g = play_game(Position::startpos(), &params, 9).unwrap();
        assert_eq!(g.moves.len(), 6);
        assert_eq!(g.termination, Termination::MaxPlies);
        assert_eq!(g.moves[0], "e2e4");
    }
}
