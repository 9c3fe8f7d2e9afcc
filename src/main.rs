//! Headless blockfall runner (default binary).
//!
//! Plays a fixed number of pieces with a seeded random placement policy and prints
//! the visible board and the score. Useful for smoke-testing the engine and for
//! producing save files.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use blockfall::core::SimpleRng;
use blockfall::engine::{Session, SessionConfig};
use blockfall::types::{GameAction, HIDDEN_ROWS};

#[derive(Debug, Clone, PartialEq, Eq)]
struct RunConfig {
    seed: Option<u32>,
    pieces: u32,
    save: Option<PathBuf>,
    resume: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            pieces: 50,
            save: None,
            resume: None,
        }
    }
}

fn parse_args(args: &[String]) -> Result<RunConfig> {
    let mut config = RunConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--seed" | "--pieces" | "--save" | "--resume" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("blockfall: missing value for {}", flag))?;
                match flag {
                    "--seed" => {
                        config.seed = Some(
                            v.parse::<u32>()
                                .map_err(|_| anyhow!("blockfall: invalid --seed value: {}", v))?,
                        );
                    }
                    "--pieces" => {
                        config.pieces = v
                            .parse::<u32>()
                            .map_err(|_| anyhow!("blockfall: invalid --pieces value: {}", v))?;
                    }
                    "--save" => config.save = Some(PathBuf::from(v)),
                    _ => config.resume = Some(PathBuf::from(v)),
                }
            }
            other => {
                return Err(anyhow!("blockfall: unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let run = parse_args(&args)?;

    let mut config = SessionConfig::from_env();
    if let Some(seed) = run.seed {
        config.seed = seed;
    }

    let mut session = Session::new(config)
        .map_err(|e| anyhow!("blockfall: bad board config: {}", e))?;

    match &run.resume {
        Some(path) => {
            if let Err(e) = session.resume_from_path(path) {
                eprintln!(
                    "[blockfall] cannot resume from {}: {}; starting fresh",
                    path.display(),
                    e
                );
                session.start();
            }
        }
        None => {
            session.start();
        }
    }

    // Placement choices use their own stream so they do not disturb the piece queue.
    let mut policy = SimpleRng::new(config.seed.wrapping_add(0x9e37_79b9));
    let width = session.board().grid().width() as u32;

    let mut placed = 0u32;
    while placed < run.pieces && !session.game_over() {
        place_one(&mut session, &mut policy, width);
        placed += 1;
    }

    print_board(&session);
    println!(
        "pieces={} score={} lines={} level={}{}",
        placed,
        session.score(),
        session.lines(),
        session.level(),
        if session.game_over() { " GAME OVER" } else { "" }
    );

    if let Some(path) = &run.save {
        session
            .save_to_path(path)
            .map_err(|e| anyhow!("blockfall: save to {} failed: {}", path.display(), e))?;
        eprintln!("[blockfall] saved to {}", path.display());
    }

    Ok(())
}

/// Random rotation, walk toward a random column, then hard drop
fn place_one(session: &mut Session, policy: &mut SimpleRng, width: u32) {
    for _ in 0..policy.next_range(4) {
        session.apply_action(GameAction::Rotate);
    }

    let target = policy.next_range(width) as i32 - 1;
    while let Some(piece) = session.board().active() {
        let step = match piece.x.cmp(&target) {
            std::cmp::Ordering::Less => GameAction::MoveRight,
            std::cmp::Ordering::Greater => GameAction::MoveLeft,
            std::cmp::Ordering::Equal => break,
        };
        if !session.apply_action(step) {
            break;
        }
    }

    session.apply_action(GameAction::HardDrop);
}

fn print_board(session: &Session) {
    let board = session.board().grid().to_string();
    for line in board.lines().skip(HIDDEN_ROWS) {
        println!("|{}|", line);
    }
}
