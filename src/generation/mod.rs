//! # Generation Module
//!
//! The staged pipeline that turns a fully walled grid into the labyrinth.
//!
//! Stages run in a fixed order and never revisit earlier work:
//! carving, then gates, then points of interest, then shortcuts. All
//! randomness is drawn from one seeded generator passed down by the caller.

pub mod carving;
pub mod gates;
pub mod placement;

pub use carving::*;
pub use gates::*;
pub use placement::*;

use crate::{config, CellKind, Grid, LabyrinthError, LabyrinthResult, PoiKind, Position};
use log::{debug, info};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Configuration for a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: i64,
    /// Grid width in cells
    pub width: u32,
    /// Grid height in cells
    pub height: u32,
}

impl GenerationConfig {
    /// Creates a configuration for a square grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use labyrinth_gen::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(40, 42);
    /// assert_eq!(config.width, 40);
    /// assert_eq!(config.height, 40);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(size: u32, seed: i64) -> Self {
        Self {
            seed,
            width: size,
            height: size,
        }
    }

    /// Creates a configuration for testing with a small grid.
    pub fn for_testing(seed: i64) -> Self {
        Self::new(10, seed)
    }

    /// Seed as fed to the PRNG. Negative seeds keep their bit pattern.
    pub fn rng_seed(&self) -> u64 {
        self.seed as u64
    }

    /// Rejects grids too small to hold the gate layout.
    pub fn validate(&self) -> LabyrinthResult<()> {
        if self.width < config::MIN_SIZE || self.height < config::MIN_SIZE {
            return Err(LabyrinthError::InvalidConfig(format!(
                "grid must be at least {min}x{min}, got {}x{}",
                self.width,
                self.height,
                min = config::MIN_SIZE
            )));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(config::DEFAULT_SIZE, config::DEFAULT_SEED)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> LabyrinthResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> LabyrinthResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// A fully generated labyrinth, ready to be turned into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labyrinth {
    /// Seed the run was started with
    pub seed: i64,
    /// Carved and classified lattice
    pub grid: Grid,
    /// City gates in fixed city order
    pub gates: Vec<GateInfo>,
    /// Portal shortcuts; a cell's `pair` index points into this list
    pub shortcuts: Vec<ShortcutPair>,
}

impl Labyrinth {
    /// Finds the other end of the shortcut a cell belongs to.
    pub fn portal_partner(&self, pos: Position) -> Option<Position> {
        let cell = self.grid.cell(pos)?;
        match cell.kind {
            CellKind::ShortcutEndpoint { pair, .. } => {
                self.shortcuts.get(pair).and_then(|shortcut| shortcut.partner_of(pos))
            }
            _ => None,
        }
    }

    /// Counts what the run produced.
    pub fn summary(&self) -> GenerationSummary {
        let poi = |kind: PoiKind| {
            self.grid
                .count_kind(|cell_kind| cell_kind == CellKind::PointOfInterest(kind))
        };

        GenerationSummary {
            width: self.grid.width(),
            height: self.grid.height(),
            seed: self.seed,
            rooms: self.grid.len(),
            passages: self.grid.passage_edge_count(),
            gates: self.gates.len(),
            treasure: poi(PoiKind::Treasure),
            merchants: poi(PoiKind::Merchant),
            lore_npcs: poi(PoiKind::LoreNpc),
            shortcuts: self.shortcuts.len(),
        }
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub width: u32,
    pub height: u32,
    pub seed: i64,
    pub rooms: usize,
    pub passages: usize,
    pub gates: usize,
    pub treasure: usize,
    pub merchants: usize,
    pub lore_npcs: usize,
    pub shortcuts: usize,
}

impl std::fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Labyrinth {}x{} (seed {})",
            self.width, self.height, self.seed
        )?;
        writeln!(f, "  rooms:      {}", self.rooms)?;
        writeln!(f, "  passages:   {}", self.passages)?;
        writeln!(f, "  gates:      {}", self.gates)?;
        writeln!(f, "  treasure:   {}", self.treasure)?;
        writeln!(f, "  merchants:  {}", self.merchants)?;
        writeln!(f, "  lore NPCs:  {}", self.lore_npcs)?;
        write!(f, "  shortcuts:  {}", self.shortcuts)
    }
}

/// Generator for the city-linking labyrinth.
///
/// Runs the stages in order:
/// 1. Carve a perfect maze from the grid center
/// 2. Pin the city gates
/// 3. Drop points of interest on dead ends
/// 4. Pair shortcut endpoints across diagonal quadrants
#[derive(Debug, Clone, Default)]
pub struct LabyrinthGenerator {
    quotas: PlacementQuotas,
}

impl LabyrinthGenerator {
    /// Creates a generator with the standard placement quotas.
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn with_quotas(quotas: PlacementQuotas) -> Self {
        Self { quotas }
    }
}

impl Generator<Labyrinth> for LabyrinthGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> LabyrinthResult<Labyrinth> {
        config.validate()?;

        let mut grid = Grid::new(config.width, config.height);

        let carved = carve(&mut grid, rng);
        debug!("Carved {} passages from {}", carved, grid.center());

        let gates = place_gates(&mut grid);
        debug!("Placed {} gates", gates.len());

        let report = place_points_of_interest(&mut grid, rng, &self.quotas);
        debug!(
            "Placed {} points of interest on {} dead ends",
            report.assignments.len(),
            report.dead_ends
        );

        let shortcuts = place_shortcuts(&mut grid, rng, &self.quotas);
        debug!("Placed {} shortcuts", shortcuts.len());

        let labyrinth = Labyrinth {
            seed: config.seed,
            grid,
            gates,
            shortcuts,
        };

        self.validate(&labyrinth, config)?;
        info!(
            "{} finished a {}x{} labyrinth",
            self.generator_type(),
            config.width,
            config.height
        );

        Ok(labyrinth)
    }

    fn validate(&self, labyrinth: &Labyrinth, config: &GenerationConfig) -> LabyrinthResult<()> {
        if labyrinth.grid.width() != config.width || labyrinth.grid.height() != config.height {
            return Err(LabyrinthError::GenerationFailed(format!(
                "grid is {}x{}, expected {}x{}",
                labyrinth.grid.width(),
                labyrinth.grid.height(),
                config.width,
                config.height
            )));
        }

        crate::utils::validate_spanning_tree(&labyrinth.grid)
    }

    fn generator_type(&self) -> &'static str {
        "LabyrinthGenerator"
    }
}

/// Utility functions for generation runs.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.rng_seed())
    }
}
