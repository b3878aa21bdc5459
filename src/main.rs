//! # Burrow Command Line
//!
//! Generates a single level and prints it as ASCII or JSON.

use burrow::{config, BurrowResult, GenerationConfig, GenerationResult, LevelGenerator, Theme};
use clap::{Parser, ValueEnum};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

/// Output encodings for a generated level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Glyph map followed by a short summary
    Ascii,
    /// Full generation result as JSON
    Json,
}

/// Command line arguments for the Burrow level generator.
#[derive(Parser, Debug)]
#[command(name = "burrow")]
#[command(about = "Seeded procedural level generator for dungeons, caves and fortresses")]
#[command(version)]
struct Args {
    /// Level width in tiles
    #[arg(long, default_value_t = config::DEFAULT_LEVEL_WIDTH)]
    width: u32,

    /// Level height in tiles
    #[arg(long, default_value_t = config::DEFAULT_LEVEL_HEIGHT)]
    height: u32,

    /// Random seed for level generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Depth of the level (1 or more)
    #[arg(short, long, default_value_t = 1)]
    level: u32,

    /// Layout theme: dungeon, cave or fortress (unknown names use dungeon)
    #[arg(short, long, default_value = "dungeon")]
    theme: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,

    /// JSON file with generation parameters overriding the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reject out-of-bounds writes instead of clipping them
    #[arg(long)]
    strict: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting Burrow v{}", burrow::VERSION);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logger; `RUST_LOG` takes precedence over `--log-level`.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();
}

fn load_config(args: &Args) -> BurrowResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading generation config from {}", path.display());
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str(&text)?
        }
        None => GenerationConfig::default(),
    };
    config.strict_bounds |= args.strict;
    Ok(config)
}

fn run(args: &Args) -> BurrowResult<()> {
    let config = load_config(args)?;
    let theme = Theme::from_name(&args.theme);

    let mut generator = LevelGenerator::with_config(args.width, args.height, args.seed, config)?;
    let result = generator.generate(args.level, theme)?;

    match args.format {
        OutputFormat::Ascii => print_ascii(&result),
        OutputFormat::Json => println!("{}", result.to_json()?),
    }
    Ok(())
}

fn print_ascii(result: &GenerationResult) {
    print!("{}", result.grid);
    println!(
        "seed {} | {} level {} | {} rooms | spawn {}",
        result.seed,
        result.theme,
        result.level,
        result.rooms.len(),
        result.spawn_point
    );
}
