//! # Maze Module
//!
//! The lattice the labyrinth is carved from.
//!
//! This module contains the value types every generation stage shares:
//! - Lattice coordinates and the four cardinal directions
//! - Per-cell wall state and classification
//! - The fixed-size grid that owns every cell

pub mod grid;

pub use grid::*;

use serde::{Deserialize, Serialize};

/// Represents a cell coordinate on the labyrinth lattice.
///
/// # Examples
///
/// ```
/// use labyrinth_gen::{Direction, Position};
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.step(Direction::North), Position::new(10, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position one step away in the given direction.
    pub fn step(self, direction: Direction) -> Position {
        self + direction.to_delta()
    }

    /// Key that orders positions row by row, top to bottom.
    pub fn row_major_key(self) -> (i32, i32) {
        (self.y, self.x)
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four cardinal directions of the lattice.
///
/// North is towards `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Canonical direction order. Carving shuffles a copy of this array, so
    /// changing it changes every generated maze.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use labyrinth_gen::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Returns the direction pointing back the way this one came.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Exit name used in the room document.
    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }

    /// Slot of this direction in a cell's wall array.
    pub(crate) fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }
}
