//! Dungeon system
//!
//! Contains tiles, geometry, rooms, corridors, pathfinding and level generation.

mod corridor;
mod entity;
mod generation;
mod geometry;
mod grid;
mod pathfinding;
mod room;
mod tile;

pub use corridor::carve_corridor;
pub use entity::{Entity, EntityKind};
pub use generation::{Dungeon, generate};
pub use geometry::{Connectivity, Point, Rect, Side, neighbors};
pub use grid::Grid;
pub use pathfinding::find_path;
pub use room::{Room, RoomKind};
pub use tile::{TILES, Tile, TileKind};
