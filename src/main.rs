//! # Labyrinth Generator Entry Point
//!
//! Generates the labyrinth once, writes the room graph document, and prints a
//! summary of what was placed.

use clap::Parser;
use labyrinth_gen::{
    config, generation::utils::create_rng, render_ascii, DocumentFormat, GenerationConfig,
    Generator, LabyrinthDocument, LabyrinthGenerator, LabyrinthResult,
};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line arguments for the labyrinth generator.
#[derive(Parser, Debug)]
#[command(name = "labyrinth-gen")]
#[command(about = "Generate the labyrinth room graph that links the city gates")]
#[command(version)]
struct Args {
    /// Grid width and height in cells
    #[arg(long, default_value_t = config::DEFAULT_SIZE,
          value_parser = clap::value_parser!(u32).range(config::MIN_SIZE as i64..))]
    size: u32,

    /// Random seed for maze generation
    #[arg(long, default_value_t = config::DEFAULT_SEED, allow_negative_numbers = true)]
    seed: i64,

    /// Directory the document is written to
    #[arg(long, default_value = config::DEFAULT_OUTPUT_DIR)]
    out: PathBuf,

    /// Document encoding (yaml or json)
    #[arg(long, default_value_t = DocumentFormat::Yaml)]
    format: DocumentFormat,

    /// Print an ASCII rendering of the maze
    #[arg(long)]
    preview: bool,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting labyrinth generator v{}", labyrinth_gen::VERSION);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("labyrinth-gen: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();
}

/// Runs every stage and writes the document.
fn run(args: &Args) -> LabyrinthResult<()> {
    let config = GenerationConfig::new(args.size, args.seed);
    let generator = LabyrinthGenerator::new();
    let mut rng = create_rng(&config);

    info!(
        "Generating {}x{} labyrinth with seed {}",
        config.width, config.height, config.seed
    );
    let labyrinth = generator.generate(&config, &mut rng)?;

    if args.preview {
        print!("{}", render_ascii(&labyrinth.grid));
    }

    let document = LabyrinthDocument::from_labyrinth(&labyrinth);
    let path = document.write_to_dir(&args.out, args.format)?;

    println!("{}", labyrinth.summary());
    println!("Wrote {}", path.display());

    Ok(())
}
