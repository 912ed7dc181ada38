//! Dungeon generation
//!
//! Places rooms, carves corridors between them, opens doors and scatters
//! entities, all from one seeded generator.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::config::DungeonConfig;
use crate::consts::{DOOR_CHANCE, PLACEMENT_ATTEMPTS_PER_ROOM, ROOM_MARGIN};
use crate::error::Result;
use crate::rng::GameRng;

use super::corridor::carve_corridor;
use super::entity::Entity;
use super::geometry::{Point, Rect};
use super::grid::Grid;
use super::room::{Room, RoomKind};
use super::tile::TileKind;

/// A generated dungeon level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dungeon {
    config: DungeonConfig,
    rng: GameRng,
    grid: Grid,
    /// In placement order
    rooms: Vec<Room>,
    entities: Vec<Entity>,
    entrance: Option<Point>,
    exit: Option<Point>,
}

impl Dungeon {
    /// Generate a dungeon from a random seed
    pub fn new(config: DungeonConfig) -> Result<Self> {
        Self::generate(config, GameRng::from_entropy())
    }

    /// Generate a dungeon that can be replayed from `seed`
    pub fn with_seed(config: DungeonConfig, seed: u64) -> Result<Self> {
        Self::generate(config, GameRng::new(seed))
    }

    fn generate(config: DungeonConfig, rng: GameRng) -> Result<Self> {
        config.validate()?;

        let grid = Grid::new(config.width, config.height, TileKind::Wall);
        let mut dungeon = Self {
            config,
            rng,
            grid,
            rooms: Vec::new(),
            entities: Vec::new(),
            entrance: None,
            exit: None,
        };
        debug!("generating dungeon with seed {}", dungeon.seed());

        dungeon.place_rooms();
        dungeon.connect_rooms();
        dungeon.place_doors();
        dungeon.place_entities();
        if dungeon.config.place_stairs {
            dungeon.place_stairs();
        }
        Ok(dungeon)
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Entrance tile, when stairs were placed
    pub fn entrance(&self) -> Option<Point> {
        self.entrance
    }

    /// Exit tile, when stairs were placed
    pub fn exit(&self) -> Option<Point> {
        self.exit
    }

    /// Room whose rectangle contains `p`
    pub fn room_at(&self, p: Point) -> Option<&Room> {
        self.rooms.iter().find(|room| room.contains(p))
    }

    /// Synthesize a room interior around an entry point
    ///
    /// See [`Room::generate_interior`]; returns the room seed.
    pub fn generate_room(&self, room: &mut Room, entry_x: i32, entry_y: i32) -> Result<u64> {
        room.generate_interior(Point::new(entry_x, entry_y))
    }

    /// Pick a room kind by weight, falling back to normal when every weight is zero
    fn choose_room_kind(&mut self) -> RoomKind {
        let table = self.config.room_kind_table();
        let weights: Vec<f64> = table.iter().map(|&(_, w)| w).collect();
        self.rng
            .weighted_index(&weights)
            .map_or(RoomKind::Normal, |i| table[i].0)
    }

    /// Place non-overlapping rooms by rejection sampling
    fn place_rooms(&mut self) {
        let target = self.config.num_rooms;
        let (min_size, max_size) = (self.config.room_min_size, self.config.room_max_size);
        let (width, height) = (self.width(), self.height());

        for attempt in 0..target * PLACEMENT_ATTEMPTS_PER_ROOM {
            if self.rooms.len() >= target {
                break;
            }

            let Some(w) = self.rng.range_inclusive(min_size, max_size) else {
                continue;
            };
            let Some(h) = self.rng.range_inclusive(min_size, max_size) else {
                continue;
            };
            // Leave room for the outer wall
            let Some(x) = self.rng.range_inclusive(1, width - w - 1) else {
                continue;
            };
            let Some(y) = self.rng.range_inclusive(1, height - h - 1) else {
                continue;
            };

            let rect = Rect::new(x, y, w, h);
            if self
                .rooms
                .iter()
                .any(|r| rect.overlaps(&r.rect(), ROOM_MARGIN))
            {
                trace!("attempt {}: {:?} overlaps", attempt, rect);
                continue;
            }

            let kind = self.choose_room_kind();
            let seed = self.rng.next_seed();
            let room = Room::new(x, y, w, h, kind, Some(seed));
            self.carve_room(&room);
            self.rooms.push(room);
        }

        if self.rooms.len() < target {
            warn!("placed {} of {} rooms", self.rooms.len(), target);
        }
        if self.config.dead_end_last_room {
            if let Some(last) = self.rooms.last_mut() {
                last.set_dead_end(true);
            }
        }
        debug!("placed {} rooms", self.rooms.len());
    }

    fn carve_room(&mut self, room: &Room) {
        let tile = room.kind().floor_tile();
        let rect = room.rect();
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.grid.set(Point::new(x, y), tile);
            }
        }
    }

    /// Link each room to the next in placement order
    fn connect_rooms(&mut self) {
        let centers: Vec<Point> = self.rooms.iter().map(Room::center).collect();
        let windingness = self.config.corridor_windingness;
        for pair in centers.windows(2) {
            carve_corridor(&mut self.grid, pair[0], pair[1], windingness, &mut self.rng);
        }
    }

    /// Wall with an orthogonal floor neighbour
    fn is_door_candidate(&self, p: Point) -> bool {
        self.grid.get(p).is_some_and(TileKind::is_wall)
            && [(0, -1), (0, 1), (-1, 0), (1, 0)]
                .iter()
                .any(|&(dx, dy)| self.grid.is_kind(p.offset(dx, dy), TileKind::Floor))
    }

    fn check_and_place_door(&mut self, room_idx: usize, p: Point) {
        if self.is_door_candidate(p) && self.rng.gen_f64() < DOOR_CHANCE {
            self.grid.set(p, TileKind::Door);
            // The door still opens onto the corridor; a dead end just doesn't list it
            if !self.rooms[room_idx].is_dead_end() {
                self.rooms[room_idx].push_exit(p);
            }
        }
    }

    /// Open doors in room walls next to corridors
    fn place_doors(&mut self) {
        for idx in 0..self.rooms.len() {
            let rect = self.rooms[idx].rect();

            for x in rect.x..rect.right() {
                // Top wall
                self.check_and_place_door(idx, Point::new(x, rect.y - 1));
                // Bottom wall
                self.check_and_place_door(idx, Point::new(x, rect.bottom()));
            }

            for y in rect.y..rect.bottom() {
                // Left wall
                self.check_and_place_door(idx, Point::new(rect.x - 1, y));
                // Right wall
                self.check_and_place_door(idx, Point::new(rect.right(), y));
            }
        }
        debug!("placed {} doors", self.grid.count(TileKind::Door));
    }

    /// Scatter the configured entities over random rooms
    fn place_entities(&mut self) {
        if self.rooms.is_empty() {
            warn!("no rooms to hold entities");
            return;
        }

        let counts: Vec<_> = self
            .config
            .entity_counts
            .iter()
            .map(|(&kind, &count)| (kind, count))
            .collect();
        for (kind, count) in counts {
            for _ in 0..count {
                let idx = self.rng.rn2(self.rooms.len() as u32) as usize;
                let pos = self.rooms[idx].random_point(&mut self.rng);
                let entity = Entity::new(kind, pos);
                self.entities.push(entity);
                self.rooms[idx].push_entity(entity);
            }
        }
    }

    /// Mark the entrance in the first room and the exit in the last
    fn place_stairs(&mut self) {
        let (Some(first), Some(last)) = (self.rooms.first(), self.rooms.last()) else {
            return;
        };
        let up = first.random_point(&mut self.rng);
        let down = last.random_point(&mut self.rng);

        self.grid.set(up, TileKind::Entry);
        self.entrance = Some(up);
        // Make sure we don't place on the entrance
        if down != up {
            self.grid.set(down, TileKind::Exit);
            self.exit = Some(down);
        }
    }
}

/// Generate a dungeon from a random seed
pub fn generate(config: DungeonConfig) -> Result<Dungeon> {
    Dungeon::new(config)
}
