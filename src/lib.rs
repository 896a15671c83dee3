//! Tile merge (workspace facade crate).
//!
//! Exposes `tile_merge::{core,engine,types}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use tile_merge_core as core;
pub use tile_merge_engine as engine;
pub use tile_merge_types as types;
