//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the board simulation and the phase sequencer that drives
//! turn-taking. It has **zero dependencies** on UI, input devices, or I/O, making it:
//!
//! - **Deterministic**: Every random draw comes from an injected [`RandomSource`]
//! - **Testable**: Comprehensive unit tests for all board rules
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: Zero-allocation sweeps over a flat 4x4 array
//!
//! # Module Structure
//!
//! - [`board`]: 4x4 grid with directional sweeps, merges, locks, and spawning
//! - [`sequencer`]: Enter/action/exit state machine with gosub/return
//! - [`rng`]: Random source trait, LCG for deterministic play
//! - [`snapshot`]: Read-only board view for renderers
//! - [`error`]: Sequencer transition errors
//!
//! # Game Rules
//!
//! - **Slide**: Each sweep moves every tile one cell toward the chosen direction
//! - **Merge**: Equal neighbors combine; the merged cell is locked for the rest of the turn
//! - **Score**: Every merge scores the value it produces
//! - **Spawn**: After a turn that moved something, a 2 (or rarely a 4) appears in a random empty cell
//! - **Game over**: No cell can move in any direction
//!
//! # Example
//!
//! ```
//! use tile_merge_core::{Board, SimpleRng};
//! use tile_merge_core::types::Direction;
//!
//! let mut board = Board::from_values([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
//!
//! let (sweeps, score) = board.collapse(Direction::Left);
//! assert_eq!(sweeps.len(), 1);
//! assert_eq!(score, 4);
//! assert_eq!(board.get(0, 0).unwrap().value, 4);
//!
//! let mut rng = SimpleRng::new(12345);
//! let spawned = board.spawn_tile(&mut rng, 10).unwrap();
//! assert!(spawned.value == 2 || spawned.value == 4);
//! ```

pub mod board;
pub mod error;
pub mod rng;
pub mod sequencer;
pub mod snapshot;

pub use tile_merge_types as types;

// Re-export commonly used types for convenience
pub use board::{relative_pos, Board, Spawned, StepResult};
pub use error::SequencerError;
pub use rng::{RandomSource, SimpleRng};
pub use sequencer::{Hook, PhaseDef, PhaseSequencer};
pub use snapshot::BoardSnapshot;
