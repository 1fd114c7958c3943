//! # Point of Interest and Shortcut Placement
//!
//! Runs on the finished maze. Points of interest go on dead ends; shortcut
//! endpoints go on ordinary passages in diagonally opposite quadrants.
//! Running short of eligible cells is never an error: the stage places what
//! it can and moves on.

use crate::{CellKind, Grid, PoiKind, Position, ShortcutSide};
use log::warn;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

const TREASURE_RANGE: RangeInclusive<usize> = 5..=10;
const MERCHANT_RANGE: RangeInclusive<usize> = 3..=5;
const LORE_NPC_RANGE: RangeInclusive<usize> = 5..=8;
const SHORTCUT_PAIR_RANGE: RangeInclusive<usize> = 2..=3;

/// Diagonal quadrant pairings, tried in this order for every pair index.
/// Quadrants are numbered 0 top-left, 1 top-right, 2 bottom-left, 3 bottom-right.
const QUADRANT_PAIRINGS: [(usize, usize); 2] = [(0, 3), (1, 2)];

/// How many of each placement to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementQuotas {
    treasure: RangeInclusive<usize>,
    merchant: RangeInclusive<usize>,
    lore_npc: RangeInclusive<usize>,
    shortcut_pairs: RangeInclusive<usize>,
}

impl Default for PlacementQuotas {
    fn default() -> Self {
        Self {
            treasure: TREASURE_RANGE,
            merchant: MERCHANT_RANGE,
            lore_npc: LORE_NPC_RANGE,
            shortcut_pairs: SHORTCUT_PAIR_RANGE,
        }
    }
}

impl PlacementQuotas {
    /// Allowed count range for a point of interest kind.
    pub fn range_for(&self, kind: PoiKind) -> RangeInclusive<usize> {
        match kind {
            PoiKind::Treasure => self.treasure.clone(),
            PoiKind::Merchant => self.merchant.clone(),
            PoiKind::LoreNpc => self.lore_npc.clone(),
        }
    }

    /// Allowed range for the number of shortcut pair rounds.
    pub fn shortcut_pairs(&self) -> RangeInclusive<usize> {
        self.shortcut_pairs.clone()
    }

    /// Quotas with exact counts.
    #[cfg(test)]
    pub(crate) fn fixed(treasure: usize, merchant: usize, lore_npc: usize, pairs: usize) -> Self {
        Self {
            treasure: treasure..=treasure,
            merchant: merchant..=merchant,
            lore_npc: lore_npc..=lore_npc,
            shortcut_pairs: pairs..=pairs,
        }
    }
}

/// Outcome of the point of interest pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoiReport {
    /// Eligible dead ends found before placement
    pub dead_ends: usize,
    /// Counts drawn per kind, in placement order
    pub requested: Vec<(PoiKind, usize)>,
    /// Cells that received a point of interest, in placement order
    pub assignments: Vec<(PoiKind, Position)>,
}

impl PoiReport {
    /// Number of cells assigned the given kind.
    pub fn placed(&self, kind: PoiKind) -> usize {
        self.assignments.iter().filter(|(k, _)| *k == kind).count()
    }
}

/// A portal connecting two cells that are not lattice neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutPair {
    pub a: Position,
    pub b: Position,
}

impl ShortcutPair {
    /// Returns the opposite endpoint, or None if `pos` is not an endpoint.
    pub fn partner_of(&self, pos: Position) -> Option<Position> {
        if pos == self.a {
            Some(self.b)
        } else if pos == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Collects non-gate cells with exactly one passage, row by row.
pub fn find_dead_ends(grid: &Grid) -> Vec<Position> {
    grid.cells()
        .filter(|cell| cell.kind.is_passage() && cell.is_dead_end())
        .map(|cell| cell.position)
        .collect()
}

/// Assigns treasure, merchants and lore NPCs to shuffled dead ends.
///
/// Kinds are filled in order from the front of one shuffled list, so no
/// cell is used twice.
pub fn place_points_of_interest(
    grid: &mut Grid,
    rng: &mut StdRng,
    quotas: &PlacementQuotas,
) -> PoiReport {
    let mut dead_ends = find_dead_ends(grid);
    dead_ends.shuffle(rng);

    let mut report = PoiReport {
        dead_ends: dead_ends.len(),
        ..PoiReport::default()
    };

    let mut available = dead_ends.into_iter();
    for kind in PoiKind::ALL {
        let requested = rng.gen_range(quotas.range_for(kind));
        report.requested.push((kind, requested));

        let mut placed = 0;
        for position in available.by_ref().take(requested) {
            grid.set_kind(position, CellKind::PointOfInterest(kind));
            report.assignments.push((kind, position));
            placed += 1;
        }

        if placed < requested {
            warn!(
                "Only {} of {} {:?} placed: dead ends exhausted",
                placed, requested, kind
            );
        }
    }

    report
}

/// Quadrant index of a position relative to the grid midpoints.
pub fn quadrant_of(pos: Position, mid_x: i32, mid_y: i32) -> usize {
    match (pos.x >= mid_x, pos.y >= mid_y) {
        (false, false) => 0,
        (true, false) => 1,
        (false, true) => 2,
        (true, true) => 3,
    }
}

/// Links ordinary passages in opposite quadrants with portal shortcuts.
///
/// Every round pairs quadrant 0 with 3 and then 1 with 2. A pairing whose
/// quadrants have run dry is skipped.
pub fn place_shortcuts(
    grid: &mut Grid,
    rng: &mut StdRng,
    quotas: &PlacementQuotas,
) -> Vec<ShortcutPair> {
    let mid_x = grid.width() as i32 / 2;
    let mid_y = grid.height() as i32 / 2;

    let mut quadrants: [Vec<Position>; 4] = Default::default();
    for cell in grid.cells().filter(|cell| cell.kind.is_passage()) {
        quadrants[quadrant_of(cell.position, mid_x, mid_y)].push(cell.position);
    }
    for quadrant in quadrants.iter_mut() {
        quadrant.shuffle(rng);
    }

    let rounds = rng.gen_range(quotas.shortcut_pairs());
    let mut shortcuts = Vec::new();

    for _ in 0..rounds {
        for (from, to) in QUADRANT_PAIRINGS {
            if quadrants[from].is_empty() || quadrants[to].is_empty() {
                warn!("Skipping shortcut between quadrants {from} and {to}: no candidates left");
                continue;
            }
            let (Some(a), Some(b)) = (quadrants[from].pop(), quadrants[to].pop()) else {
                continue;
            };

            let pair = shortcuts.len();
            grid.set_kind(
                a,
                CellKind::ShortcutEndpoint {
                    pair,
                    side: ShortcutSide::A,
                },
            );
            grid.set_kind(
                b,
                CellKind::ShortcutEndpoint {
                    pair,
                    side: ShortcutSide::B,
                },
            );
            shortcuts.push(ShortcutPair { a, b });
        }
    }

    shortcuts
}
