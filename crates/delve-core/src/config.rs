//! Dungeon generation settings

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::consts::MIN_ROOM_EDGE;
use crate::dungeon::{EntityKind, RoomKind};
use crate::error::{GenError, Result};

/// Settings for a generated dungeon
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    /// Grid width in tiles
    pub width: i32,
    /// Grid height in tiles
    pub height: i32,
    /// Target room count
    pub num_rooms: usize,
    pub room_min_size: i32,
    pub room_max_size: i32,
    /// Relative room kind weights; absent kinds weigh 1
    pub room_kind_weights: BTreeMap<RoomKind, f64>,
    /// Probability in `[0, 1]` that a corridor step goes along Y
    pub corridor_windingness: f64,
    /// Entities to scatter, per kind
    pub entity_counts: BTreeMap<EntityKind, usize>,
    /// Mark an entrance in the first room and an exit in the last
    pub place_stairs: bool,
    /// Make the last placed room a dead end that lists no exits
    pub dead_end_last_room: bool,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 40,
            num_rooms: 15,
            room_min_size: 5,
            room_max_size: 12,
            room_kind_weights: BTreeMap::from([
                (RoomKind::Normal, 0.6),
                (RoomKind::Treasure, 0.2),
                (RoomKind::Trap, 0.1),
                (RoomKind::Boss, 0.05),
            ]),
            corridor_windingness: 0.2,
            entity_counts: BTreeMap::from([
                (EntityKind::Player, 1),
                (EntityKind::Monster, 10),
                (EntityKind::Item, 5),
                (EntityKind::Npc, 2),
            ]),
            place_stairs: false,
            dead_end_last_room: false,
        }
    }
}

impl DungeonConfig {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Weight of a room kind, defaulting to 1
    pub fn room_kind_weight(&self, kind: RoomKind) -> f64 {
        self.room_kind_weights.get(&kind).copied().unwrap_or(1.0)
    }

    /// Weights of every room kind in declaration order
    pub fn room_kind_table(&self) -> Vec<(RoomKind, f64)> {
        RoomKind::iter()
            .map(|kind| (kind, self.room_kind_weight(kind)))
            .collect()
    }

    /// Check that the settings can produce a dungeon
    pub fn validate(&self) -> Result<()> {
        if self.room_min_size < MIN_ROOM_EDGE {
            return Err(GenError::invalid_config(format!(
                "room_min_size must be at least {MIN_ROOM_EDGE}, got {}",
                self.room_min_size
            )));
        }
        if self.room_min_size > self.room_max_size {
            return Err(GenError::invalid_config(format!(
                "room_min_size {} exceeds room_max_size {}",
                self.room_min_size, self.room_max_size
            )));
        }
        if self.width <= 2 * self.room_max_size || self.height <= 2 * self.room_max_size {
            return Err(GenError::invalid_config(format!(
                "{}x{} grid must exceed twice room_max_size {} in both dimensions",
                self.width, self.height, self.room_max_size
            )));
        }
        if self.num_rooms == 0 {
            return Err(GenError::invalid_config("num_rooms must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.corridor_windingness) {
            return Err(GenError::invalid_config(format!(
                "corridor_windingness must lie in [0, 1], got {}",
                self.corridor_windingness
            )));
        }
        if let Some((kind, weight)) = self
            .room_kind_weights
            .iter()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(GenError::invalid_config(format!(
                "weight for {kind} must be finite and non-negative, got {weight}"
            )));
        }
        Ok(())
    }
}
