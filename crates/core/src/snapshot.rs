use arrayvec::ArrayVec;

use crate::board::{Board, StepResult};
use crate::types::{Move, BOARD_SIZE, CELL_COUNT};

/// Read-only view handed to renderers: tile values plus the last sweep's moves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardSnapshot {
    /// Tile values indexed `[y][x]`
    pub values: [[u32; BOARD_SIZE]; BOARD_SIZE],
    pub moves: ArrayVec<Move, CELL_COUNT>,
    pub score_delta: u32,
    pub score: u32,
    pub game_over: bool,
}

impl BoardSnapshot {
    pub fn capture(board: &Board, step: Option<&StepResult>, score_delta: u32) -> Self {
        Self {
            values: board.to_values(),
            moves: step.map(|s| s.moves.clone()).unwrap_or_default(),
            score_delta,
            score: 0,
            game_over: false,
        }
    }

    pub fn clear(&mut self) {
        self.values = [[0u32; BOARD_SIZE]; BOARD_SIZE];
        self.moves.clear();
        self.score_delta = 0;
        self.score = 0;
        self.game_over = false;
    }

    pub fn value_at(&self, x: usize, y: usize) -> Option<u32> {
        self.values.get(y).and_then(|row| row.get(x)).copied()
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            values: [[0u32; BOARD_SIZE]; BOARD_SIZE],
            moves: ArrayVec::new(),
            score_delta: 0,
            score: 0,
            game_over: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn test_capture_after_step() {
        let mut board = Board::from_values([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let step = board.single_step(Direction::Left);
        let snap = BoardSnapshot::capture(&board, Some(&step), step.score);

        assert_eq!(snap.value_at(0, 0), Some(4));
        assert_eq!(snap.value_at(1, 0), Some(0));
        assert_eq!(snap.value_at(4, 0), None);
        assert_eq!(snap.moves.as_slice(), &[Move::new(1, 0)]);
        assert_eq!(snap.score_delta, 4);
    }

    #[test]
    fn test_clear_resets_everything() {
        let board = Board::from_values([[8; 4]; 4]);
        let mut snap = BoardSnapshot::capture(&board, None, 16);
        snap.score = 100;
        snap.clear();
        assert_eq!(snap, BoardSnapshot::default());
    }
}
