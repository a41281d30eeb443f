//! Merge Drop headless driver
//!
//! Runs a seeded autoplay session through the same frame/pointer path a host
//! page would use, logging status changes along the way.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use merge_drop::board::GameStatus;
use merge_drop::game::{ButtonAction, Game, PointerEvent};
use merge_drop::settings::Settings;

/// Command-line arguments for a headless session
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Seed for the drop queue, shakes and the autoplayer
    #[arg(long, default_value_t = 0x5EED)]
    seed: u64,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 7200)]
    frames: u32,
    /// Frame duration in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    /// Frames between autoplay drops
    #[arg(long, default_value_t = 45)]
    drop_every: u32,
    /// JSON settings file (missing fields use defaults)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Print the final board snapshot as JSON
    #[arg(long)]
    snapshot: bool,
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    let settings = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Settings::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => Settings::default(),
    };
    settings.validate().context("invalid settings")?;
    Ok(settings)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();
    let settings = load_settings(args.config.as_ref())?;
    log::info!("Merge Drop (headless) starting, seed {:#x}", args.seed);

    let mut game = Game::new(settings, args.seed);
    let mut player = Pcg32::seed_from_u64(args.seed ^ 0xA11CE);
    let mut status = game.status();
    let mut drops = 0u32;
    let mut shakes = 0u32;

    for frame in 0..args.frames {
        game.frame(args.dt);

        if game.status() != status {
            log::info!("Frame {}: {} -> {}", frame, status.as_str(), game.status().as_str());
            status = game.status();
        }

        match status {
            GameStatus::Won => break,
            GameStatus::Lost => {
                game.press(ButtonAction::Shake);
                shakes += 1;
            }
            GameStatus::Playable if frame % args.drop_every.max(1) == 0 => {
                let available = game.board().available();
                if available.is_empty() {
                    continue;
                }
                let x = available[player.random_range(0..available.len())] as f32;
                let y = game.board().layout().y_canvas_to_offset(game.board().layout().box_top());
                game.pointer(PointerEvent::Move { x, y });
                if game.pointer(PointerEvent::Up { x, y }) {
                    drops += 1;
                }
            }
            _ => {}
        }
    }

    let board = game.board();
    println!(
        "status={} balls={} drops={} shakes={} win={}",
        board.status().as_str(),
        board.world().balls().len(),
        drops,
        shakes,
        board.world().win()
    );
    if args.snapshot {
        let json = serde_json::to_string_pretty(&board.snapshot()).context("serializing snapshot")?;
        println!("{}", json);
    }
    Ok(())
}
