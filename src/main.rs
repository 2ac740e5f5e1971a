//! `aether` - run the backdrop in a window, or render a PNG snapshot.
//!
//! ```text
//! aether                                   open a window
//! aether --seed 7 --no-overlay             fixed seed, no guide grid
//! aether --snapshot out.png --frames 120 --size 800x600
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use aether::{export, window, BackdropConfig, RunError};

#[derive(Parser, Debug)]
#[command(name = "aether")]
#[command(about = "Ambient particle backdrop", long_about = None)]
#[command(version)]
struct Cli {
    /// Fixed RNG seed for a reproducible field
    #[arg(long)]
    seed: Option<u64>,

    /// Hide the golden-ratio guide grid
    #[arg(long)]
    no_overlay: bool,

    /// Render headlessly and write the image to this path instead of opening a window
    #[arg(long, value_name = "OUT.png")]
    snapshot: Option<PathBuf>,

    /// Frames to simulate before the snapshot is taken
    #[arg(long, default_value_t = 240)]
    frames: u32,

    /// Snapshot size in pixels
    #[arg(long, value_name = "WxH", default_value = "1280x720", value_parser = parse_size)]
    size: (u32, u32),
}

impl Cli {
    fn config(&self) -> BackdropConfig {
        let config = BackdropConfig::default().with_overlay(!self.no_overlay);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), RunError> {
    let config = cli.config();
    match cli.snapshot {
        Some(path) => {
            let (width, height) = cli.size;
            export::render_snapshot(config, width, height, cli.frames, path)?;
            Ok(())
        }
        None => window::run(config),
    }
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let parsed = s
        .split_once('x')
        .and_then(|(w, h)| Some((w.parse::<u32>().ok()?, h.parse::<u32>().ok()?)));
    match parsed {
        Some((w, h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(format!("expected WIDTHxHEIGHT like 1280x720, got '{}'", s)),
    }
}
