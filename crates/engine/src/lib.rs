//! Game engine - turn sequencing on top of the core board
//!
//! Wires [`tile_merge_core::Board`] operations into a
//! [`tile_merge_core::PhaseSequencer`] so a driver only has to feed directions:
//!
//! ```
//! use tile_merge_engine::{Game, GameConfig, Phase};
//! use tile_merge_engine::core::SimpleRng;
//! use tile_merge_engine::types::Direction;
//!
//! let mut game = Game::new(GameConfig::default(), SimpleRng::new(12345)).unwrap();
//! assert_eq!(game.phase(), Some(Phase::AwaitInput));
//!
//! let turn = game.submit(Direction::Left).unwrap();
//! if turn.moved() {
//!     assert!(turn.spawned.is_some());
//! }
//! assert_eq!(game.score(), turn.score);
//! ```

pub mod config;
pub mod error;
pub mod game;

pub use tile_merge_core as core;
pub use tile_merge_types as types;

pub use config::GameConfig;
pub use error::{ConfigError, GameError};
pub use game::{Game, Phase, TurnOutcome};
