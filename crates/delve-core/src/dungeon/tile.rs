//! Tile kinds and the static tile registry

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Kind of a map tile
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TileKind {
    #[default]
    Wall = 0,
    Floor = 1,
    Door = 2,
    Treasure = 3,
    Trap = 4,
    Water = 5,
    Entry = 6,
    Exit = 7,
    Player = 8,
}

/// Immutable descriptor of a tile kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub kind: TileKind,
    pub glyph: char,
    pub walkable: bool,
    pub description: &'static str,
}

/// Registry of every tile descriptor, indexed by `TileKind as usize`
pub static TILES: [Tile; 9] = [
    Tile {
        kind: TileKind::Wall,
        glyph: '#',
        walkable: false,
        description: "A solid wall",
    },
    Tile {
        kind: TileKind::Floor,
        glyph: '.',
        walkable: true,
        description: "A stone floor",
    },
    Tile {
        kind: TileKind::Door,
        glyph: '+',
        walkable: true,
        description: "A wooden door",
    },
    Tile {
        kind: TileKind::Treasure,
        glyph: '$',
        walkable: true,
        description: "A glittering floor",
    },
    Tile {
        kind: TileKind::Trap,
        glyph: '^',
        walkable: true,
        description: "A suspicious floor",
    },
    Tile {
        kind: TileKind::Water,
        glyph: '~',
        walkable: false,
        description: "A pool of water",
    },
    Tile {
        kind: TileKind::Entry,
        glyph: '<',
        walkable: true,
        description: "The dungeon entrance",
    },
    Tile {
        kind: TileKind::Exit,
        glyph: 'X',
        walkable: true,
        description: "The exit point",
    },
    Tile {
        kind: TileKind::Player,
        glyph: '@',
        walkable: true,
        description: "The player (you)",
    },
];

impl TileKind {
    /// Kinds that interior synthesis scatters as features
    pub const FEATURES: [TileKind; 3] = [TileKind::Trap, TileKind::Treasure, TileKind::Water];

    /// Registry descriptor for this kind
    pub fn tile(self) -> &'static Tile {
        &TILES[self as usize]
    }

    /// Display glyph
    pub fn glyph(self) -> char {
        self.tile().glyph
    }

    /// Can an entity walk over this tile
    pub fn is_walkable(self) -> bool {
        self.tile().walkable
    }

    pub const fn is_wall(self) -> bool {
        matches!(self, TileKind::Wall)
    }

    pub const fn is_door(self) -> bool {
        matches!(self, TileKind::Door)
    }

    /// Look up a kind by its glyph
    pub fn from_glyph(glyph: char) -> Option<TileKind> {
        TILES.iter().find(|t| t.glyph == glyph).map(|t| t.kind)
    }
}
