use anyhow::Context;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use plybot::config::EngineConfig;
use plybot::selfplay::{generate_games, write_jsonl, Opponent, SelfPlayParams, Termination};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OpponentArg { Bot, Random }

#[derive(Parser, Debug)]
#[command(name = "plybot-selfplay", about = "Play the bot against itself or a random mover and write JSONL records")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, default_value_t = 200)]
    max_plies: usize,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, value_enum, default_value_t = OpponentArg::Bot)]
    opponent: OpponentArg,
    #[arg(long)]
    openings: Option<PathBuf>,
    /// JSON file with engine weights
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "out/selfplay.jsonl")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let engine = match &a.config {
        Some(p) => EngineConfig::from_json_file(p).with_context(|| format!("loading {}", p.display()))?,
        None => EngineConfig::default(),
    };
    let opponent = match a.opponent { OpponentArg::Bot => Opponent::Bot, OpponentArg::Random => Opponent::Random };

    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} games")?);

    // Run in batches of `threads` games so the bar moves. Seeds and openings follow
    // the game index, so batching does not change the records.
    let mut games = Vec::with_capacity(a.games);
    let batch = a.threads.max(1);
    let mut done = 0usize;
    while done < a.games {
        let n = batch.min(a.games - done);
        let params = SelfPlayParams {
            games: n,
            max_plies: a.max_plies,
            threads: a.threads,
            seed: a.seed.wrapping_add(done as u64),
            opponent,
            openings_path: a.openings.clone(),
            engine: engine.clone(),
        };
        games.extend(generate_games(&params)?);
        done += n;
        pb.set_position(done as u64);
    }
    pb.finish_and_clear();

    if let Some(dir) = a.out.parent() { std::fs::create_dir_all(dir)?; }
    write_jsonl(&games, &a.out)?;
    let white = games.iter().filter(|g| g.result > 0).count();
    let black = games.iter().filter(|g| g.result < 0).count();
    let capped = games.iter().filter(|g| g.termination == Termination::MaxPlies).count();
    eprintln!("{} games: +{} -{} ={} ({} hit the ply cap) -> {}",
        games.len(), white, black, games.len() - white - black, capped, a.out.display());
    Ok(())
}
