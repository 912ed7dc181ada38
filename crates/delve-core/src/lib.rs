//! delve-core: seeded tile-grid dungeon generation
//!
//! Builds dungeons of non-overlapping rooms joined by winding corridors, with
//! doors and scattered entities, and synthesizes single-room interiors. Every
//! random decision flows through a seeded generator, so a seed replays the
//! same result. The crate performs no I/O and never prints.

pub mod config;
pub mod dungeon;

mod consts;
mod error;
mod rng;

pub use config::DungeonConfig;
pub use consts::*;
pub use dungeon::{Dungeon, generate};
pub use error::{GenError, Result};
pub use rng::GameRng;
