//! CLI for maze hints

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use log::{debug, LevelFilter};
use maze_hint::render::{HintReport, Scene};
use maze_hint::Direction;

/// The shortest way from the player to the nearest exit
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Walk the hint on the terminal
    #[arg(short, long)]
    playback: bool,

    /// Playback frame length in milliseconds
    #[arg(short, long, default_value_t = 300)]
    frame_length: usize,

    /// Player moves to make before the hint, e.g. `RRDD`. Moves into walls
    /// or off the maze are ignored.
    #[arg(short, long, default_value = "")]
    moves: String,

    /// Enable debug messages
    #[arg(short, long)]
    debug: bool,

    /// File, where to read the maze. Use `-` for stdin.
    file: PathBuf,
}

/// Read maze from file, print hint
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let emojis = if args.file.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&args.file)
            .with_context(|| format!("Could not read maze from {}", args.file.display()))?
    };
    let mut scene = Scene::parse_emojis(emojis.trim())?;

    for c in args.moves.chars() {
        let dir = Direction::try_from(c)?;
        if !scene.step(dir) {
            debug!("Move {:?} from {} is blocked", dir, scene.player());
        }
    }
    if scene.is_victory() {
        println!("Victory! The player stands on an exit.");
        return Ok(());
    }

    let report = scene.hint()?;

    match (&report, args.playback) {
        (HintReport::Route(path), true) => scene.playback(path, args.frame_length),
        _ => report.print_report(),
    }
    Ok(())
}
