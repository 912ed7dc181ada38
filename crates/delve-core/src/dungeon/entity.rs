//! Entities placed in rooms

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::geometry::Point;

/// Kind of entity
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Player,
    Monster,
    Item,
    Npc,
}

impl EntityKind {
    /// Kinds scattered into a synthesized room interior
    pub const ROOM_POPULATION: [EntityKind; 3] =
        [EntityKind::Monster, EntityKind::Item, EntityKind::Npc];

    pub const fn glyph(self) -> char {
        match self {
            EntityKind::Player => '@',
            EntityKind::Monster => 'M',
            EntityKind::Item => 'I',
            EntityKind::Npc => 'N',
        }
    }
}

/// Something standing on the map
///
/// Several entities may share a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub glyph: char,
    pub pos: Point,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Point) -> Self {
        Self {
            kind,
            glyph: kind.glyph(),
            pos,
        }
    }

    pub fn is_player(&self) -> bool {
        self.kind == EntityKind::Player
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_glyph_follows_kind() {
        let e = Entity::new(EntityKind::Npc, Point::new(3, 4));
        assert_eq!(e.glyph, 'N');
        assert_eq!(e.pos, Point::new(3, 4));
        assert!(!e.is_player());
        assert!(Entity::new(EntityKind::Player, Point::default()).is_player());
    }

    #[test]
    fn test_kind_order_for_config_maps() {
        assert!(EntityKind::Player < EntityKind::Monster);
        assert!(EntityKind::Item < EntityKind::Npc);
    }
}
