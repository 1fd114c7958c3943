//! # Connectivity Analysis
//!
//! Reachability and spanning-tree checks over the cleared-wall graph of a grid.
//! Portal shortcuts are not lattice edges and are ignored here.

use crate::{Grid, LabyrinthError, LabyrinthResult, Position};
use pathfinding::prelude::{bfs, bfs_reach};
use std::collections::HashSet;

/// Every cell reachable from `start` through cleared walls.
pub fn reachable_cells(grid: &Grid, start: Position) -> HashSet<Position> {
    if !grid.in_bounds(start) {
        return HashSet::new();
    }
    bfs_reach(start, |&pos| grid.open_neighbors(pos)).collect()
}

/// Shortest walk between two cells, both ends included.
pub fn path_between(grid: &Grid, from: Position, to: Position) -> Option<Vec<Position>> {
    if !grid.in_bounds(from) || !grid.in_bounds(to) {
        return None;
    }
    bfs(&from, |&pos| grid.open_neighbors(pos), |&pos| pos == to)
}

/// Fails unless the cleared walls form a spanning tree of the grid.
///
/// A connected graph on `n` cells with exactly `n - 1` edges has no cycle,
/// so the edge count plus one flood fill rules out loops.
pub fn validate_spanning_tree(grid: &Grid) -> LabyrinthResult<()> {
    let expected_edges = grid.len().saturating_sub(1);
    let edges = grid.passage_edge_count();
    if edges != expected_edges {
        return Err(LabyrinthError::GenerationFailed(format!(
            "maze has {} passages, expected {}",
            edges, expected_edges
        )));
    }

    let reached = reachable_cells(grid, grid.center()).len();
    if reached != grid.len() {
        return Err(LabyrinthError::GenerationFailed(format!(
            "only {} of {} cells reachable from the center",
            reached,
            grid.len()
        )));
    }

    Ok(())
}
