//! Terminal Tetris runner (default binary).
//!
//! Plays in the terminal by default; `--headless` runs without input and
//! writes one JSON line per frame to stdout instead.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event};
use log::info;

use rx_tetris::core::{Game, GameConfig, RotationAnchor};
use rx_tetris::input::{map_key, should_quit};
use rx_tetris::term::{GameView, JsonLinesTarget, TerminalTarget};

#[derive(Debug, Parser)]
#[command(name = "rx-tetris", version, about = "Terminal Tetris driven by a reactive signal graph")]
struct Cli {
    /// TOML config file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for the piece sequence (default: derived from the clock).
    #[arg(long)]
    seed: Option<u32>,

    #[arg(long, value_name = "MS")]
    gravity_ms: Option<u32>,

    #[arg(long, value_name = "MS")]
    frame_ms: Option<u32>,

    /// Column a piece takes when it rotates.
    #[arg(long, value_enum)]
    rotation_anchor: Option<AnchorArg>,

    /// Write logs to this file (filter from RUST_LOG, default info).
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Run without a terminal, printing frames as JSON lines.
    #[arg(long)]
    headless: bool,

    /// Stop a headless run after this many frames.
    #[arg(long, value_name = "N", requires = "headless")]
    max_frames: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AnchorArg {
    Spawn,
    Keep,
}

impl From<AnchorArg> for RotationAnchor {
    fn from(arg: AnchorArg) -> Self {
        match arg {
            AnchorArg::Spawn => RotationAnchor::Spawn,
            AnchorArg::Keep => RotationAnchor::Keep,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = resolve_config(&cli)?;
    info!("seed {}", config.seed.unwrap_or_default());

    if cli.headless {
        return run_headless(&config, cli.max_frames);
    }

    let mut target = TerminalTarget::new(GameView::default());
    target.enter()?;

    let result = run(&config, &mut target);

    // Always try to restore terminal state.
    let _ = target.exit();
    result
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init()?;
    Ok(())
}

/// Config file (or defaults), then CLI overrides, then validation.
fn resolve_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(ms) = cli.gravity_ms {
        config.gravity_ms = ms;
    }
    if let Some(ms) = cli.frame_ms {
        config.frame_ms = ms;
    }
    if let Some(anchor) = cli.rotation_anchor {
        config.rotation_anchor = anchor.into();
    }
    config.seed = cli.seed.or(config.seed).or_else(|| Some(clock_seed()));

    config.validate()?;
    Ok(config)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

fn run(config: &GameConfig, target: &mut TerminalTarget) -> Result<()> {
    let mut game = Game::new(config);
    let mut last = Instant::now();

    loop {
        // Wait for input until the next tick is due (indefinitely once over).
        let timeout = if game.is_over() {
            Duration::from_millis(250)
        } else {
            Duration::from_millis(u64::from(game.clock().until_next_ms()))
                .saturating_sub(last.elapsed())
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(input) = map_key(key) {
                        game.input(input);
                    }
                }
                Event::Resize(..) => target.repaint()?,
                _ => {}
            }
        }

        let elapsed = last.elapsed();
        let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
        if elapsed_ms > 0 {
            last += Duration::from_millis(u64::from(elapsed_ms));
            game.advance(elapsed_ms, target)?;
        }
    }
}

fn run_headless(config: &GameConfig, max_frames: Option<u64>) -> Result<()> {
    let stdout = io::stdout();
    let mut target = JsonLinesTarget::new(BufWriter::new(stdout.lock()));
    let mut game = Game::new(config);
    let limit = max_frames.unwrap_or(u64::MAX);

    while !game.is_over() && game.frames() < limit {
        game.advance(config.frame_ms, &mut target)?;
    }

    info!("headless run finished after {} frames", game.frames());
    target.into_inner().flush()?;
    Ok(())
}
