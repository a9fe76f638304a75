use std::io::{self, BufRead};
use std::time::Duration;

use cozy_chess::Color;
use log::{debug, warn};

use crate::board::cozy::Position;
use crate::config::EngineConfig;
use crate::search::bot::Bot;
use crate::timer::Timer;

pub struct UciEngine {
    pos: Position,
    bot: Bot,
}

impl UciEngine {
    pub fn new(cfg: EngineConfig) -> Self { Self { pos: Position::startpos(), bot: Bot::new(cfg) } }

    pub fn position(&self) -> &Position { &self.pos }

    fn cmd_uci(&self) -> Vec<String> {
        vec!["id name PlyBot".to_string(), "id author PlyBot Team".to_string(), "uciok".to_string()]
    }

    fn cmd_ucinewgame(&mut self) {
        self.pos = Position::startpos();
        self.bot.reset();
    }

    fn cmd_position(&mut self, args: &str) {
        // 'position startpos [moves ...]' and 'position fen <fen> [moves ...]'
        let mut tokens = args.split_whitespace();
        let base = match tokens.next() {
            Some("startpos") => Position::startpos(),
            Some("fen") => {
                let fen_fields: Vec<&str> = tokens.by_ref().take_while(|t| *t != "moves").collect();
                match Position::from_fen(&fen_fields.join(" ")) {
                    Ok(p) => p,
                    Err(e) => { warn!("{e}"); return; }
                }
            }
            _ => return,
        };
        let mut pos = base;
        for m in tokens.filter(|t| *t != "moves") {
            if let Err(e) = pos.play_uci(m) { warn!("{e}"); return; }
        }
        self.pos = pos;
    }

    fn parse_timer(&self, args: &str) -> Timer {
        let mut wtime = None;
        let mut btime = None;
        let mut winc = 0u64;
        let mut binc = 0u64;
        let mut movetime = None;
        let mut tokens = args.split_whitespace();
        while let Some(tok) = tokens.next() {
            let mut value = || tokens.next().and_then(|s| s.parse::<u64>().ok());
            match tok {
                "wtime" => wtime = value(),
                "btime" => btime = value(),
                "winc" => winc = value().unwrap_or(0),
                "binc" => binc = value().unwrap_or(0),
                "movetime" => movetime = value(),
                _ => {}
            }
        }
        let (clock, inc) = if self.pos.side_to_move() == Color::White { (wtime, winc) } else { (btime, binc) };
        Timer::new(movetime.or(clock).map(Duration::from_millis), Duration::from_millis(inc))
    }

    fn cmd_go(&mut self, args: &str) -> String {
        let timer = self.parse_timer(args);
        debug!("go with {:?} remaining, {:?} increment", timer.remaining(), timer.increment());
        match self.bot.decide(&mut self.pos, &timer) {
            Ok(mv) => format!("bestmove {}", mv),
            Err(e) => { warn!("{e}"); "bestmove 0000".to_string() }
        }
    }

    /// Handle one command line. Returns the response lines, or `None` on quit.
    pub fn handle(&mut self, line: &str) -> Option<Vec<String>> {
        let line = line.trim();
        match line {
            "" => return Some(Vec::new()),
            "uci" => return Some(self.cmd_uci()),
            "isready" => return Some(vec!["readyok".to_string()]),
            "ucinewgame" => { self.cmd_ucinewgame(); return Some(Vec::new()); }
            "quit" => return None,
            _ => {}
        }
        if let Some(rest) = line.strip_prefix("position ") { self.cmd_position(rest); return Some(Vec::new()); }
        if line == "go" { return Some(vec![self.cmd_go("")]); }
        if let Some(rest) = line.strip_prefix("go ") { return Some(vec![self.cmd_go(rest)]); }
        Some(Vec::new())
    }

    pub fn run_loop(&mut self) {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line { Ok(s) => s, Err(_) => break };
            match self.handle(&line) {
                Some(out) => { for l in out { println!("{l}"); } }
                None => break,
            }
        }
    }
}
