//! SB Arcade - native entry point
//!
//! Usage: sb-arcade [OPTIONS] <GAME>

use std::path::PathBuf;
use std::process;

use clap::Parser;
use sb_arcade::sim::{InputEvent, Key};
use sb_arcade::{Game, GameKind, Result, Settings};

#[derive(Parser, Debug)]
#[command(name = "sb-arcade")]
#[command(version)]
#[command(about = "Half-Pong, a maze-ball game and a platformer", long_about = None)]
struct Args {
    /// Game to play
    #[arg(value_enum)]
    game: GameKind,

    /// Settings file (JSON); defaults are used when it doesn't exist
    #[arg(short, long, default_value = sb_arcade::settings::DEFAULT_PATH)]
    settings: PathBuf,

    /// Stop after this many frames
    #[arg(short, long)]
    frames: Option<u64>,

    /// RNG seed (Half-Pong serves and sparks); time-based when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Run a scripted session without opening a window
    #[arg(long)]
    headless: bool,
}

/// Frame step for headless runs (ms)
const HEADLESS_DT_MS: u32 = 16;
/// Headless frame count when `--frames` is omitted
const HEADLESS_FRAMES: u64 = 1800;

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Scripted input for headless runs: a little of everything each game reacts to
fn scripted_input(kind: GameKind, frame: u64) -> Vec<InputEvent> {
    let phase = frame % 120;
    match kind {
        GameKind::Pong => match phase {
            0 => vec![InputEvent::key_down(Key::Up)],
            40 => vec![InputEvent::key_up(Key::Up)],
            60 => vec![InputEvent::key_down(Key::Down)],
            100 => vec![InputEvent::key_up(Key::Down), InputEvent::key_down(Key::Space)],
            _ => Vec::new(),
        },
        GameKind::Maze => match phase {
            0 => vec![InputEvent::key_down(Key::Right)],
            60 => vec![InputEvent::key_down(Key::Down)],
            _ => Vec::new(),
        },
        GameKind::Platformer => match phase {
            0 => vec![InputEvent::key_down(Key::Left)],
            30 => vec![InputEvent::key_down(Key::Up)],
            31 => vec![InputEvent::key_up(Key::Up)],
            90 => vec![InputEvent::key_up(Key::Left)],
            _ => Vec::new(),
        },
    }
}

fn run_headless(kind: GameKind, game: &mut dyn Game, frames: u64) {
    log::info!("Headless {} for {} frames", game.title(), frames);
    for frame in 0..frames {
        for event in scripted_input(kind, frame) {
            game.handle_event(&event);
        }
        game.update(HEADLESS_DT_MS);
    }
    let scene = game.scene();
    for text in scene.texts() {
        log::info!("HUD: {}", text);
    }
}

fn run(args: Args) -> Result<()> {
    let settings = Settings::load(&args.settings)?;
    let seed = args.seed.unwrap_or_else(time_seed);
    log::info!("Seed: {}", seed);

    let mut game = args.game.create(&settings, seed)?;

    #[cfg(feature = "sdl")]
    {
        if !args.headless {
            return sb_arcade::platform::sdl::run(game.as_mut(), &settings, args.frames);
        }
    }
    #[cfg(not(feature = "sdl"))]
    {
        if !args.headless {
            log::warn!("Built without the `sdl` feature, running headless");
        }
    }

    run_headless(args.game, game.as_mut(), args.frames.unwrap_or(HEADLESS_FRAMES));
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("SB Arcade starting...");

    let args = Args::parse();
    if let Err(e) = run(args) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
