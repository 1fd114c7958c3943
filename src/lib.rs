//! # Labyrinth Generator
//!
//! Offline generator for the labyrinth that links the city entry points of the
//! persistent world.
//!
//! ## Architecture Overview
//!
//! Generation is a single batch pipeline. Each stage only reads what the
//! previous stage produced:
//!
//! - **Maze Model**: The cell lattice, wall state, and cell classification
//! - **Carving**: Randomized depth-first spanning tree over the lattice
//! - **Gates**: Fixed-position city entry points
//! - **Placement**: Dead-end points of interest and cross-quadrant shortcuts
//! - **Document**: Conversion of the finished grid into the room graph document
//!
//! ## Determinism
//!
//! All randomness comes from one seeded generator owned by the run. The same
//! size and seed always produce a byte-identical document.

pub mod document;
pub mod generation;
pub mod maze;
pub mod utils;

pub use document::*;
pub use generation::*;
pub use maze::*;

/// Core error type for the labyrinth generator.
#[derive(thiserror::Error, Debug)]
pub enum LabyrinthError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output directory could not be created
    #[error("Cannot create output directory {}: {}", path.display(), source)]
    OutputDir {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML encoding/decoding error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON encoding/decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generation parameters are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generated maze broke a structural guarantee
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// A loaded document does not describe a consistent room graph
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// Result type used throughout the generator.
pub type LabyrinthResult<T> = Result<T, LabyrinthError>;

/// Version information for the generator.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generator configuration constants.
pub mod config {
    /// Default grid edge length in cells (the grid is square)
    pub const DEFAULT_SIZE: u32 = 40;

    /// Smallest grid edge that can hold the gate layout
    pub const MIN_SIZE: u32 = 2;

    /// Default PRNG seed
    pub const DEFAULT_SEED: i64 = 42;

    /// Default directory the document is written to
    pub const DEFAULT_OUTPUT_DIR: &str = "content/world";

    /// File stem of the emitted document
    pub const DOCUMENT_STEM: &str = "labyrinth";

    /// Prefix of every room identifier
    pub const ROOM_ID_PREFIX: &str = "labyrinth";
}
