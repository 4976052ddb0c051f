//! CLI for maze generation

use clap::Parser;
use log::LevelFilter;
use maze_hint::maze_generator::{GeneratorConfig, MazeGenerator};
use maze_hint::render::{HintReport, Scene};

/// Solvable random maze generator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Generated grid width and height
    #[arg(long, default_value_t = GeneratorConfig::REFERENCE_SIZE)]
    size: usize,

    /// Number of obstacle placements [default: size * 10]
    #[arg(long)]
    density: Option<usize>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Give up after this many unsolvable candidates
    #[arg(long)]
    max_attempts: Option<usize>,

    /// Draw the hint trail from the start to the exit
    #[arg(long)]
    hint: bool,

    /// Enable debug messages
    #[arg(short, long)]
    debug: bool,
}

/// Generate maze, print it as emojis
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let mut config = GeneratorConfig::new(args.size);
    if let Some(density) = args.density {
        config = config.with_obstacle_density(density);
    }
    if let Some(max_attempts) = args.max_attempts {
        config = config.with_max_attempts(max_attempts);
    }

    let mut gen = MazeGenerator::new(args.seed);
    let scene = Scene::from_maze(gen.generate(&config)?);

    let hint = if args.hint {
        match scene.hint()? {
            HintReport::Route(path) => Some(path),
            HintReport::NoRoute => None,
        }
    } else {
        None
    };
    println!("{}", scene.render(hint.as_deref()));
    Ok(())
}
