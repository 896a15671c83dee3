//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (board engine, game driver, rendering).
//!
//! # Board Dimensions
//!
//! The board is a fixed square grid:
//!
//! - **Size**: 4x4 cells (`BOARD_SIZE`)
//! - **Coordinates**: `(x, y)` with x = column (left to right), y = row (top to bottom)
//! - **Storage**: flat, row-major (`y * BOARD_SIZE + x`)
//!
//! # Direction Vectors
//!
//! Increasing y moves downward:
//!
//! | Direction | (dx, dy) |
//! |-----------|----------|
//! | `Up` | (0, -1) |
//! | `Down` | (0, +1) |
//! | `Left` | (-1, 0) |
//! | `Right` | (+1, 0) |
//!
//! # Examples
//!
//! ```
//! use tile_merge_types::{Cell, Direction, BOARD_SIZE};
//!
//! let dir = Direction::from_str("left").unwrap();
//! assert_eq!(dir.dx_dy(), (-1, 0));
//!
//! let cell = Cell::tile(2);
//! assert!(!cell.is_empty());
//! assert!(!cell.locked);
//!
//! assert_eq!(BOARD_SIZE, 4);
//! ```

/// Board width and height in cells
pub const BOARD_SIZE: usize = 4;

/// Total number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Value of a regular spawned tile
pub const SPAWN_VALUE: u32 = 2;

/// Value of a rare spawned tile
pub const SPAWN_VALUE_RARE: u32 = 4;

/// Default chance (percent) that a spawned tile is `SPAWN_VALUE_RARE`
pub const DEFAULT_FOUR_CHANCE_PERCENT: u32 = 10;

/// Default number of tiles placed on a fresh board
pub const DEFAULT_INITIAL_TILES: usize = 2;

/// A single grid position
///
/// - `value == 0`: empty cell
/// - `value > 0`: tile magnitude (conventionally a power of two; only equality
///   and sums are ever used)
/// - `locked`: the cell already absorbed a merge during the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub value: u32,
    pub locked: bool,
}

impl Cell {
    /// An empty, unlocked cell
    pub const EMPTY: Cell = Cell {
        value: 0,
        locked: false,
    };

    /// An unlocked tile with the given value
    pub const fn tile(value: u32) -> Self {
        Self {
            value,
            locked: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0
    }
}

/// The four slide directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in declaration order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector for this direction
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_merge_types::Direction;
    ///
    /// assert_eq!(Direction::Up.dx_dy(), (0, -1));
    /// assert_eq!(Direction::Down.dx_dy(), (0, 1));
    /// assert_eq!(Direction::Left.dx_dy(), (-1, 0));
    /// assert_eq!(Direction::Right.dx_dy(), (1, 0));
    /// ```
    pub fn dx_dy(&self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Parse direction from string (case-insensitive)
    ///
    /// Accepts full names or single letters: "up" | "u", "down" | "d",
    /// "left" | "l", "right" | "r"
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_merge_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("r"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Free-function form of [`Direction::dx_dy`]
pub fn dx_dy(dir: Direction) -> (i8, i8) {
    dir.dx_dy()
}

/// Origin coordinate of a cell that slid or merged during a step.
///
/// Purely descriptive; renderers use it to animate the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub x: usize,
    pub y: usize,
}

impl Move {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}
