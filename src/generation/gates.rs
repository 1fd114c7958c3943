//! # Gate Placement
//!
//! Pins every city to a fixed cell so the city-to-labyrinth topology is the
//! same for every seed.

use crate::{CellKind, City, Grid, Position};
use serde::{Deserialize, Serialize};

/// Labyrinth side of a city entrance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateInfo {
    pub city: City,
    pub position: Position,
}

impl GateInfo {
    pub fn city_id(&self) -> &'static str {
        self.city.id()
    }

    pub fn display_name(&self) -> &'static str {
        self.city.display_name()
    }
}

/// Where each city's gate sits on a `width` x `height` grid.
///
/// North, east, south and west gates sit at the middle of their edge;
/// Ashfall takes the north-west corner.
///
/// # Examples
///
/// ```
/// use labyrinth_gen::{gate_position, City, Position};
///
/// assert_eq!(gate_position(City::Highmoor, 40, 40), Position::new(20, 0));
/// assert_eq!(gate_position(City::Sunreach, 40, 40), Position::new(39, 20));
/// ```
pub fn gate_position(city: City, width: u32, height: u32) -> Position {
    let (w, h) = (width as i32, height as i32);
    match city {
        City::Highmoor => Position::new(w / 2, 0),
        City::Sunreach => Position::new(w - 1, h / 2),
        City::Saltmere => Position::new(w / 2, h - 1),
        City::Thornwall => Position::new(0, h / 2),
        City::Ashfall => Position::new(0, 0),
    }
}

/// Marks the gate cells. Walls are left exactly as carving made them.
///
/// Gates are processed in [`City::ALL`] order; where two positions coincide
/// (only on a 2x2 grid) the later city owns the cell.
pub fn place_gates(grid: &mut Grid) -> Vec<GateInfo> {
    City::ALL
        .into_iter()
        .map(|city| {
            let position = gate_position(city, grid.width(), grid.height());
            grid.set_kind(position, CellKind::Gate(city));
            GateInfo { city, position }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carve;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_default_gate_layout() {
        let mut grid = Grid::new(40, 40);
        let gates = place_gates(&mut grid);

        let positions: Vec<_> = gates.iter().map(|gate| gate.position).collect();
        assert_eq!(
            positions,
            vec![
                Position::new(20, 0),
                Position::new(39, 20),
                Position::new(20, 39),
                Position::new(0, 20),
                Position::new(0, 0),
            ]
        );
        assert_eq!(gates[4].city_id(), "ashfall");
        assert_eq!(gates[0].display_name(), "Highmoor");
    }

    #[test]
    fn test_gates_do_not_touch_walls() {
        let mut grid = Grid::new(9, 9);
        let mut rng = StdRng::seed_from_u64(4);
        carve(&mut grid, &mut rng);
        let before = grid.clone();

        let gates = place_gates(&mut grid);

        for gate in &gates {
            let carved = before.cell(gate.position).unwrap();
            let gated = grid.cell(gate.position).unwrap();
            assert_eq!(gated.kind, CellKind::Gate(gate.city));
            for direction in crate::Direction::ALL {
                assert_eq!(carved.has_wall(direction), gated.has_wall(direction));
            }
        }
        assert_eq!(grid.passage_edge_count(), before.passage_edge_count());
    }

    #[test]
    fn test_gates_are_in_bounds_for_small_grids() {
        for size in 2..6 {
            let grid = Grid::new(size, size);
            for city in City::ALL {
                assert!(grid.in_bounds(gate_position(city, size, size)));
            }
        }
    }

    #[test]
    fn test_gate_positions_distinct_from_three() {
        for size in 3..12 {
            let mut positions: Vec<_> = City::ALL
                .iter()
                .map(|&city| gate_position(city, size, size))
                .collect();
            positions.sort();
            positions.dedup();
            assert_eq!(positions.len(), 5, "size {size}");
        }
    }
}
