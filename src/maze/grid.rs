//! # Labyrinth Grid
//!
//! The fixed-size cell lattice and the per-cell state the generation stages
//! read and write.

use super::{Direction, Position};
use serde::{Deserialize, Serialize};

/// Cities that open onto the labyrinth.
///
/// The set is fixed; every city owns exactly one gate cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Highmoor,
    Sunreach,
    Saltmere,
    Thornwall,
    Ashfall,
}

impl City {
    /// All cities in gate placement order.
    pub const ALL: [City; 5] = [
        City::Highmoor,
        City::Sunreach,
        City::Saltmere,
        City::Thornwall,
        City::Ashfall,
    ];

    /// Stable identifier used by the world loader.
    pub fn id(self) -> &'static str {
        match self {
            City::Highmoor => "highmoor",
            City::Sunreach => "sunreach",
            City::Saltmere => "saltmere",
            City::Thornwall => "thornwall",
            City::Ashfall => "ashfall",
        }
    }

    /// Human readable city name.
    pub fn display_name(self) -> &'static str {
        match self {
            City::Highmoor => "Highmoor",
            City::Sunreach => "Sunreach",
            City::Saltmere => "Saltmere",
            City::Thornwall => "Thornwall",
            City::Ashfall => "Ashfall Hold",
        }
    }
}

/// Points of interest that are placed on dead ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoiKind {
    Treasure,
    Merchant,
    LoreNpc,
}

impl PoiKind {
    /// All kinds in placement order.
    pub const ALL: [PoiKind; 3] = [PoiKind::Treasure, PoiKind::Merchant, PoiKind::LoreNpc];
}

/// Which end of a shortcut a cell is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShortcutSide {
    A,
    B,
}

/// What a cell means to the world, independent of its walls.
///
/// A cell is exactly one of these, so a gate can never also carry treasure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellKind {
    /// Ordinary passage
    #[default]
    Passage,
    /// Labyrinth side of a city entrance
    Gate(City),
    /// Dead end holding a point of interest
    PointOfInterest(PoiKind),
    /// One end of a portal shortcut; `pair` indexes the shortcut list
    ShortcutEndpoint { pair: usize, side: ShortcutSide },
}

impl CellKind {
    /// Type tag written to the room document.
    pub fn type_tag(self) -> &'static str {
        match self {
            CellKind::Passage => "passage",
            CellKind::Gate(_) => "gate",
            CellKind::PointOfInterest(PoiKind::Treasure) => "treasure",
            CellKind::PointOfInterest(PoiKind::Merchant) => "merchant",
            CellKind::PointOfInterest(PoiKind::LoreNpc) => "lore_npc",
            CellKind::ShortcutEndpoint { .. } => "shortcut",
        }
    }

    pub fn is_passage(self) -> bool {
        matches!(self, CellKind::Passage)
    }

    pub fn is_gate(self) -> bool {
        matches!(self, CellKind::Gate(_))
    }
}

/// A single lattice position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Coordinates of this cell
    pub position: Position,
    /// Wall flags indexed by `Direction::index`; true blocks passage
    walls: [bool; 4],
    /// Set by the carver once the cell joins the spanning tree
    pub(crate) visited: bool,
    /// Classification assigned by the placement stages
    pub kind: CellKind,
}

impl Cell {
    /// Creates a fully walled, unvisited passage cell.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            walls: [true; 4],
            visited: false,
            kind: CellKind::Passage,
        }
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls[direction.index()]
    }

    pub(crate) fn remove_wall(&mut self, direction: Direction) {
        self.walls[direction.index()] = false;
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Directions without a wall, in canonical order.
    pub fn exit_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&direction| !self.has_wall(direction))
    }

    /// Number of open sides.
    pub fn passage_count(&self) -> usize {
        self.walls.iter().filter(|&&wall| !wall).count()
    }

    /// A dead end has exactly one open side.
    pub fn is_dead_end(&self) -> bool {
        self.passage_count() == 1
    }
}

/// The labyrinth lattice.
///
/// Exactly one cell exists per in-range coordinate; the grid is never
/// resized after construction. Cells are stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid where every cell has all four walls.
    ///
    /// # Examples
    ///
    /// ```
    /// use labyrinth_gen::{Grid, Position};
    ///
    /// let grid = Grid::new(4, 3);
    /// assert_eq!(grid.cells().count(), 12);
    /// assert_eq!(grid.passage_count(Position::new(0, 0)), 0);
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        let mut cells = Vec::with_capacity(cell_count(width, height));
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                cells.push(Cell::new(Position::new(x, y)));
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Checks whether a position lies on the lattice.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    /// Returns the coordinate one step away. No bounds checking; callers
    /// test the result with [`Grid::in_bounds`].
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Position {
        pos.step(direction)
    }

    /// The cell carving starts from.
    pub fn center(&self) -> Position {
        Position::new(self.width as i32 / 2, self.height as i32 / 2)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        let index = self.index(pos)?;
        Some(&self.cells[index])
    }

    pub fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        let index = self.index(pos)?;
        Some(&mut self.cells[index])
    }

    /// Iterates every cell row by row.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Sets the classification of a cell. Out of range positions are ignored.
    pub fn set_kind(&mut self, pos: Position, kind: CellKind) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.kind = kind;
        }
    }

    /// Clears the wall shared by `pos` and its neighbor in `direction`.
    ///
    /// Returns false and leaves the grid untouched when either cell is out
    /// of range.
    pub fn remove_wall_between(&mut self, pos: Position, direction: Direction) -> bool {
        let other = self.neighbor(pos, direction);
        let (Some(a), Some(b)) = (self.index(pos), self.index(other)) else {
            return false;
        };

        self.cells[a].remove_wall(direction);
        self.cells[b].remove_wall(direction.opposite());
        true
    }

    /// Checks whether one can walk from `pos` in `direction`.
    pub fn has_passage(&self, pos: Position, direction: Direction) -> bool {
        self.cell(pos)
            .map(|cell| !cell.has_wall(direction))
            .unwrap_or(false)
    }

    /// Number of open sides of the cell at `pos` (0 when out of range).
    pub fn passage_count(&self, pos: Position) -> usize {
        self.cell(pos).map(Cell::passage_count).unwrap_or(0)
    }

    /// Neighbors reachable through a cleared wall.
    pub fn open_neighbors(&self, pos: Position) -> Vec<Position> {
        match self.cell(pos) {
            Some(cell) => cell
                .exit_directions()
                .map(|direction| self.neighbor(pos, direction))
                .filter(|&next| self.in_bounds(next))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Number of cleared walls. Each shared wall is counted once.
    pub fn passage_edge_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|&direction| {
                        !cell.has_wall(direction)
                            && self.in_bounds(self.neighbor(cell.position, direction))
                    })
                    .count()
            })
            .sum()
    }

    /// Counts cells whose kind matches the predicate.
    pub fn count_kind(&self, predicate: impl Fn(CellKind) -> bool) -> usize {
        self.cells.iter().filter(|cell| predicate(cell.kind)).count()
    }
}

fn cell_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_count_is_computed_in_usize() {
        assert_eq!(cell_count(5, 4), 20);
        assert_eq!(cell_count(70_000, 70_000), 4_900_000_000);
    }

    #[test]
    fn test_new_grid_is_fully_walled() {
        let grid = Grid::new(5, 4);
        assert_eq!(grid.len(), 20);
        for cell in grid.cells() {
            assert_eq!(cell.passage_count(), 0);
            assert!(!cell.is_visited());
            assert_eq!(cell.kind, CellKind::Passage);
        }
        assert_eq!(grid.passage_edge_count(), 0);
    }

    #[test]
    fn test_cells_are_row_major() {
        let grid = Grid::new(3, 2);
        let positions: Vec<_> = grid.cells().map(|cell| cell.position).collect();
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[2], Position::new(2, 0));
        assert_eq!(positions[3], Position::new(0, 1));
    }

    #[test]
    fn test_in_bounds() {
        let grid = Grid::new(10, 8);
        assert!(grid.in_bounds(Position::new(0, 0)));
        assert!(grid.in_bounds(Position::new(9, 7)));
        assert!(!grid.in_bounds(Position::new(10, 7)));
        assert!(!grid.in_bounds(Position::new(9, 8)));
        assert!(!grid.in_bounds(Position::new(-1, 0)));
    }

    #[test]
    fn test_neighbor_is_unchecked() {
        let grid = Grid::new(3, 3);
        let outside = grid.neighbor(Position::new(0, 0), Direction::North);
        assert_eq!(outside, Position::new(0, -1));
        assert!(grid.cell(outside).is_none());
    }

    #[test]
    fn test_remove_wall_clears_both_sides() {
        let mut grid = Grid::new(3, 3);
        let pos = Position::new(1, 1);

        assert!(grid.remove_wall_between(pos, Direction::East));
        assert!(grid.has_passage(pos, Direction::East));
        assert!(grid.has_passage(Position::new(2, 1), Direction::West));
        assert!(!grid.has_passage(pos, Direction::West));
        assert_eq!(grid.passage_edge_count(), 1);
        assert_eq!(grid.open_neighbors(pos), vec![Position::new(2, 1)]);
    }

    #[test]
    fn test_remove_wall_on_border_is_rejected() {
        let mut grid = Grid::new(3, 3);
        assert!(!grid.remove_wall_between(Position::new(0, 0), Direction::West));
        assert_eq!(grid.passage_count(Position::new(0, 0)), 0);
    }

    #[test]
    fn test_dead_end_detection() {
        let mut grid = Grid::new(3, 1);
        grid.remove_wall_between(Position::new(0, 0), Direction::East);
        grid.remove_wall_between(Position::new(1, 0), Direction::East);

        assert!(grid.cell(Position::new(0, 0)).unwrap().is_dead_end());
        assert!(!grid.cell(Position::new(1, 0)).unwrap().is_dead_end());
        assert!(grid.cell(Position::new(2, 0)).unwrap().is_dead_end());
    }

    #[test]
    fn test_cell_kind_tags() {
        assert_eq!(CellKind::Passage.type_tag(), "passage");
        assert_eq!(CellKind::Gate(City::Ashfall).type_tag(), "gate");
        assert_eq!(
            CellKind::PointOfInterest(PoiKind::LoreNpc).type_tag(),
            "lore_npc"
        );
        assert_eq!(
            CellKind::ShortcutEndpoint {
                pair: 0,
                side: ShortcutSide::B
            }
            .type_tag(),
            "shortcut"
        );
    }

    #[test]
    fn test_set_kind_and_count() {
        let mut grid = Grid::new(4, 4);
        grid.set_kind(Position::new(1, 1), CellKind::Gate(City::Highmoor));
        grid.set_kind(Position::new(9, 9), CellKind::Gate(City::Sunreach));
        assert_eq!(grid.count_kind(CellKind::is_gate), 1);
        assert_eq!(grid.count_kind(CellKind::is_passage), 15);
    }

    #[test]
    fn test_city_identifiers_are_unique() {
        let mut ids: Vec<_> = City::ALL.iter().map(|city| city.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), City::ALL.len());
    }
}
