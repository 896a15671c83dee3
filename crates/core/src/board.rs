//! Board module - manages the game grid
//!
//! The board is a 4x4 grid of [`Cell`]s. Each cell holds a tile value (0 = empty)
//! and a per-step merge lock.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..3 (left to right), y ranges 0..3 (top to bottom)
//!
//! A directional move is resolved one sweep at a time: [`Board::single_step`] tries
//! to move every cell one position in the given direction, visiting cells starting
//! from the side the tiles move toward. A tile that lands in an empty neighbor keeps
//! going on the next sweep; [`Board::collapse`] repeats sweeps until nothing moves.
//! Locks persist across all sweeps of one turn and are cleared by
//! [`Board::clear_locks`] once the turn is over.

use std::fmt;

use arrayvec::ArrayVec;

use crate::rng::RandomSource;
use crate::types::{Cell, Direction, Move, BOARD_SIZE, CELL_COUNT, SPAWN_VALUE, SPAWN_VALUE_RARE};

/// Result of one full-board sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepResult {
    /// Origin of every cell that moved, in sweep order
    pub moves: ArrayVec<Move, CELL_COUNT>,
    /// Sum of the values produced by merges in this sweep
    pub score: u32,
}

impl StepResult {
    pub fn moved(&self) -> bool {
        !self.moves.is_empty()
    }
}

/// A tile placed by [`Board::spawn_tile`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spawned {
    pub x: usize,
    pub y: usize,
    pub value: u32,
}

/// Neighbor of `(x, y)` in direction `dir`.
///
/// Returns `(new_x, new_y, in_bounds)`. When the neighbor falls off the board,
/// `in_bounds` is false and the original coordinate is returned unchanged.
///
/// # Examples
///
/// ```
/// use tile_merge_core::board::relative_pos;
/// use tile_merge_core::types::Direction;
///
/// assert_eq!(relative_pos(1, 1, Direction::Left), (0, 1, true));
/// assert_eq!(relative_pos(0, 2, Direction::Left), (0, 2, false));
/// ```
pub fn relative_pos(x: usize, y: usize, dir: Direction) -> (usize, usize, bool) {
    let (dx, dy) = dir.dx_dy();
    let new_x = x as isize + dx as isize;
    let new_y = y as isize + dy as isize;
    let size = BOARD_SIZE as isize;

    if new_x < 0 || new_y < 0 || new_x >= size || new_y >= size {
        return (x, y, false);
    }
    (new_x as usize, new_y as usize, true)
}

/// The game board - 4x4 cells using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * SIZE + x)
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::EMPTY; CELL_COUNT],
        }
    }

    /// Build a board from tile values, indexed `[y][x]`. All cells start unlocked.
    pub fn from_values(values: [[u32; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let mut board = Self::new();
        for (y, row) in values.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                board.cells[y * BOARD_SIZE + x] = Cell::tile(value);
            }
        }
        board
    }

    /// Tile values indexed `[y][x]`
    pub fn to_values(&self) -> [[u32; BOARD_SIZE]; BOARD_SIZE] {
        let mut values = [[0u32; BOARD_SIZE]; BOARD_SIZE];
        for (y, row) in values.iter_mut().enumerate() {
            for (x, value) in row.iter_mut().enumerate() {
                *value = self.cells[y * BOARD_SIZE + x].value;
            }
        }
        values
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: usize, y: usize) -> Option<usize> {
        if x >= BOARD_SIZE || y >= BOARD_SIZE {
            return None;
        }
        Some(y * BOARD_SIZE + x)
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds. A zero value is stored as [`Cell::EMPTY`].
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = if cell.is_empty() { Cell::EMPTY } else { cell };
                true
            }
            None => false,
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether the cell at (x, y) can slide or merge one position toward `dir`.
    ///
    /// False for empty or out-of-range sources. Otherwise the neighbor must be on
    /// the board, unlocked, and either empty or holding the same value. A merge
    /// whose sum would not fit in a `u32` is refused.
    pub fn can_move(&self, x: usize, y: usize, dir: Direction) -> bool {
        self.can_move_with(x, y, dir, true)
    }

    fn can_move_with(&self, x: usize, y: usize, dir: Direction, respect_locks: bool) -> bool {
        let from = match self.get(x, y) {
            Some(cell) if !cell.is_empty() => cell,
            _ => return false,
        };

        let (to_x, to_y, in_bounds) = relative_pos(x, y, dir);
        if !in_bounds {
            return false;
        }

        let to = self.cells[to_y * BOARD_SIZE + to_x];
        if respect_locks && to.locked {
            return false;
        }
        to.is_empty() || (to.value == from.value && to.value.checked_add(from.value).is_some())
    }

    /// Move the cell at (x, y) one position toward `dir`.
    ///
    /// Returns `(moved, score)`. Sliding into an empty neighbor carries the cell
    /// over unchanged (lock flag included). Merging doubles the neighbor, locks it,
    /// and scores the merged value. The source is left empty in both cases.
    pub fn move_cell(&mut self, x: usize, y: usize, dir: Direction) -> (bool, u32) {
        if !self.can_move(x, y, dir) {
            return (false, 0);
        }

        let (to_x, to_y, _) = relative_pos(x, y, dir);
        let from_idx = y * BOARD_SIZE + x;
        let to_idx = to_y * BOARD_SIZE + to_x;
        let from = self.cells[from_idx];

        let mut score = 0;
        if self.cells[to_idx].is_empty() {
            self.cells[to_idx] = from;
        } else {
            // can_move refused any sum that overflows.
            let to = &mut self.cells[to_idx];
            to.value = to.value.saturating_add(from.value);
            to.locked = true;
            score = to.value;
        }
        self.cells[from_idx] = Cell::EMPTY;

        (true, score)
    }

    /// Apply [`Board::move_cell`] to every cell once, in move-toward order.
    ///
    /// - Left: rows top-to-bottom, x ascending
    /// - Right: rows top-to-bottom, x descending
    /// - Up: columns left-to-right, y ascending
    /// - Down: columns left-to-right, y descending
    ///
    /// Locks are not cleared.
    pub fn single_step(&mut self, dir: Direction) -> StepResult {
        let mut result = StepResult::default();
        let last = BOARD_SIZE - 1;

        for outer in 0..BOARD_SIZE {
            for inner in 0..BOARD_SIZE {
                let (x, y) = match dir {
                    Direction::Left => (inner, outer),
                    Direction::Right => (last - inner, outer),
                    Direction::Up => (outer, inner),
                    Direction::Down => (outer, last - inner),
                };

                let (moved, score) = self.move_cell(x, y, dir);
                if moved {
                    // Every cell is visited once, so at most CELL_COUNT moves.
                    result.moves.push(Move::new(x, y));
                }
                result.score += score;
            }
        }

        result
    }

    /// Run sweeps in `dir` until one produces no moves, then clear locks.
    ///
    /// Returns every sweep that moved something, in order, and the turn's total score.
    pub fn collapse(&mut self, dir: Direction) -> (Vec<StepResult>, u32) {
        let mut sweeps = Vec::new();
        let mut score = 0;

        loop {
            let step = self.single_step(dir);
            if !step.moved() {
                break;
            }
            score += step.score;
            sweeps.push(step);
        }

        self.clear_locks();
        (sweeps, score)
    }

    /// Unlock every cell
    pub fn clear_locks(&mut self) {
        for cell in &mut self.cells {
            cell.locked = false;
        }
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells = [Cell::EMPTY; CELL_COUNT];
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Pick a uniformly random empty cell.
    ///
    /// Draws a rank in `[0, empty_count)` and returns the empty cell of that rank
    /// in row-major order. None when the board is full; no draw is made then.
    pub fn find_free_cell<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<(usize, usize)> {
        let empty = self.empty_count();
        if empty == 0 {
            return None;
        }

        let rank = rng.next_below(empty as u32) as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .nth(rank)
            .map(|(idx, _)| (idx % BOARD_SIZE, idx / BOARD_SIZE))
    }

    /// Place a new tile into a random empty cell.
    ///
    /// The position is drawn first, then the value: `SPAWN_VALUE_RARE` with
    /// `four_chance_percent` probability, `SPAWN_VALUE` otherwise.
    pub fn spawn_tile<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        four_chance_percent: u32,
    ) -> Option<Spawned> {
        let (x, y) = self.find_free_cell(rng)?;
        let value = if rng.next_below(100) < four_chance_percent {
            SPAWN_VALUE_RARE
        } else {
            SPAWN_VALUE
        };

        self.cells[y * BOARD_SIZE + x] = Cell::tile(value);
        Some(Spawned { x, y, value })
    }

    /// Whether any cell can move in any direction (false means game over).
    ///
    /// Locks are ignored: a locked pair still counts as a move for the next turn.
    pub fn has_moves(&self) -> bool {
        (0..BOARD_SIZE).any(|y| {
            (0..BOARD_SIZE).any(|x| {
                Direction::ALL
                    .iter()
                    .any(|&dir| self.can_move_with(x, y, dir, false))
            })
        })
    }

    /// Largest tile on the board (0 when empty)
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().map(|cell| cell.value).max().unwrap_or(0)
    }

    /// Sum of all tile values
    pub fn total_value(&self) -> u32 {
        self.cells.iter().map(|cell| cell.value).sum()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(BOARD_SIZE) {
            for (x, cell) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                if cell.is_empty() {
                    write!(f, "{:>5}", ".")?;
                } else {
                    write!(f, "{:>5}", cell.value)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
