//! # Maze Carving
//!
//! Randomized depth-first backtracker that turns a fully walled grid into a
//! perfect maze: every cell reachable, exactly one path between any two.
//!
//! Depth-first carving produces long, winding corridors with few branch
//! points. The traversal keeps its own work stack instead of recursing, so
//! grid size is not limited by the call stack. Visit order and RNG draws are
//! the same as the recursive formulation.

use crate::{Direction, Grid, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// One cell on the carving stack and the directions it has left to try.
#[derive(Debug, Clone, Copy)]
struct Frame {
    position: Position,
    directions: [Direction; 4],
    next: usize,
}

/// Marks a cell visited and draws its direction order.
fn enter(grid: &mut Grid, position: Position, rng: &mut StdRng) -> Frame {
    if let Some(cell) = grid.cell_mut(position) {
        cell.visited = true;
    }

    let mut directions = Direction::ALL;
    directions.shuffle(rng);

    Frame {
        position,
        directions,
        next: 0,
    }
}

/// Carves a perfect maze starting from the grid center.
///
/// Returns the number of walls removed, which is `width * height - 1` for
/// any non-empty grid.
///
/// # Examples
///
/// ```
/// use labyrinth_gen::{carve, Grid};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut grid = Grid::new(6, 6);
/// let mut rng = StdRng::seed_from_u64(1);
/// assert_eq!(carve(&mut grid, &mut rng), 35);
/// ```
pub fn carve(grid: &mut Grid, rng: &mut StdRng) -> usize {
    let start = grid.center();
    if !grid.in_bounds(start) {
        return 0;
    }

    let mut carved = 0;
    let mut stack = vec![enter(grid, start, rng)];

    while let Some(frame) = stack.last_mut() {
        let Some(&direction) = frame.directions.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let position = frame.position;

        let next = grid.neighbor(position, direction);
        let unvisited = grid.cell(next).is_some_and(|cell| !cell.visited);
        if unvisited && grid.remove_wall_between(position, direction) {
            carved += 1;
            stack.push(enter(grid, next, rng));
        }
    }

    carved
}
