//! Generation tuning constants

/// Smallest room edge that can hold a wall ring around a floor
pub const MIN_ROOM_EDGE: i32 = 3;

/// Room placement draws per requested room
pub const PLACEMENT_ATTEMPTS_PER_ROOM: usize = 3;

/// Margin kept between placed rooms
pub const ROOM_MARGIN: i32 = 1;

/// Chance (0..1) that a door candidate becomes a door
pub const DOOR_CHANCE: f64 = 0.5;

/// Percent chance for an interior tile to become an obstacle
pub const OBSTACLE_PERCENT: u32 = 5;

/// Features placed in a synthesized room interior
pub const MIN_FEATURES: u32 = 1;
pub const MAX_FEATURES: u32 = 3;

/// Entities placed in a synthesized room interior
pub const MIN_ROOM_ENTITIES: u32 = 1;
pub const MAX_ROOM_ENTITIES: u32 = 4;

/// Exits added to a synthesized room
pub const MIN_EXITS: u32 = 1;
pub const MAX_EXITS: u32 = 3;

/// Random draws before empty-tile search falls back to a scan
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// Side draws before exit placement settles for the farthest candidate
pub const MAX_EXIT_ATTEMPTS: u32 = 8;
