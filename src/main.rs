use anyhow::{Context, Result};
use clap::Parser;
use plybot::config::EngineConfig;
use plybot::uci::UciEngine;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "One-ply heuristic chess bot speaking UCI", long_about = None)]
struct Args {
    /// JSON file with engine weights
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the repetition fallback (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Enable the check (tempo) bonus
    #[arg(long)]
    tempo: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed { cfg.seed = Some(seed); }
    if args.tempo { cfg.use_tempo = true; }
    log::info!("starting with {:?}", cfg);

    let mut engine = UciEngine::new(cfg);
    engine.run_loop();
    Ok(())
}
