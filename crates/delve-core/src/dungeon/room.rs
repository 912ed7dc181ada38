//! Rooms and single-room interior synthesis
//!
//! A room is a rectangle in its parent's coordinate space. In dungeon mode the
//! dungeon grid holds its tiles; interior synthesis gives it a local grid of
//! its own, driven entirely by the room's seeded generator.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{
    MAX_EXITS, MAX_EXIT_ATTEMPTS, MAX_FEATURES, MAX_PLACEMENT_ATTEMPTS, MAX_ROOM_ENTITIES,
    MIN_EXITS, MIN_FEATURES, MIN_ROOM_EDGE, MIN_ROOM_ENTITIES, OBSTACLE_PERCENT,
};
use crate::error::{GenError, Result};
use crate::rng::GameRng;

use super::entity::{Entity, EntityKind};
use super::geometry::{Connectivity, Point, Rect, Side};
use super::grid::Grid;
use super::pathfinding::find_path;
use super::tile::TileKind;

/// Room kinds
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    /// Plain floor
    #[default]
    Normal,
    /// Floor strewn with treasure
    Treasure,
    /// Floor riddled with traps
    Trap,
    /// Lair of a boss; carved as plain floor
    Boss,
}

impl RoomKind {
    /// Tile used when carving the room into a dungeon grid
    pub const fn floor_tile(self) -> TileKind {
        match self {
            RoomKind::Normal | RoomKind::Boss => TileKind::Floor,
            RoomKind::Treasure => TileKind::Treasure,
            RoomKind::Trap => TileKind::Trap,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RoomKind::Normal => "Ordinary room",
            RoomKind::Treasure => "Treasure room",
            RoomKind::Trap => "Trapped room",
            RoomKind::Boss => "Boss lair",
        }
    }
}

/// A rectangular room with its own generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    rect: Rect,
    kind: RoomKind,
    rng: GameRng,
    /// Local tiles; empty until an interior is synthesized
    grid: Grid,
    /// Parent-space coordinates
    entry_point: Option<Point>,
    /// Parent-space coordinates, in discovery order
    exit_points: Vec<Point>,
    entities: Vec<Entity>,
    dead_end: bool,
    exit_attempts: u32,
}

impl Room {
    /// Create a room; draws a seed from entropy when none is given
    pub fn new(x: i32, y: i32, width: i32, height: i32, kind: RoomKind, seed: Option<u64>) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            kind,
            rng: GameRng::from_seed_or_entropy(seed),
            grid: Grid::default(),
            entry_point: None,
            exit_points: Vec::new(),
            entities: Vec::new(),
            dead_end: false,
            exit_attempts: 0,
        }
    }

    /// Mark the room as a dead end: it never receives exits
    pub fn with_dead_end(mut self, dead_end: bool) -> Self {
        self.dead_end = dead_end;
        self
    }

    /// Build a walled room at the origin with an entry and, unless it is a
    /// dead end, an exit on randomly chosen sides
    pub fn standalone(width: i32, height: i32, seed: Option<u64>, dead_end: bool) -> Result<Self> {
        let mut room = Room::new(0, 0, width, height, RoomKind::Normal, seed).with_dead_end(dead_end);
        room.build_shell()?;
        room.place_entry(None)?;
        if !room.dead_end {
            room.place_exit(None)?;
        }
        Ok(room)
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn x(&self) -> i32 {
        self.rect.x
    }

    pub fn y(&self) -> i32 {
        self.rect.y
    }

    pub fn width(&self) -> i32 {
        self.rect.width
    }

    pub fn height(&self) -> i32 {
        self.rect.height
    }

    pub fn kind(&self) -> RoomKind {
        self.kind
    }

    /// Seed of the room's generator
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn entry_point(&self) -> Option<Point> {
        self.entry_point
    }

    pub fn exit_points(&self) -> &[Point] {
        &self.exit_points
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn is_dead_end(&self) -> bool {
        self.dead_end
    }

    /// Side draws spent placing exits so far
    pub fn exit_attempts(&self) -> u32 {
        self.exit_attempts
    }

    pub fn center(&self) -> Point {
        self.rect.center()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.rect.contains(p)
    }

    /// Get a random point inside the room, drawn from an outside generator
    pub fn random_point(&self, rng: &mut GameRng) -> Point {
        let x = self.rect.x + rng.rn2(self.rect.width.max(0) as u32) as i32;
        let y = self.rect.y + rng.rn2(self.rect.height.max(0) as u32) as i32;
        Point::new(x, y)
    }

    pub(crate) fn set_dead_end(&mut self, dead_end: bool) {
        self.dead_end = dead_end;
    }

    pub(crate) fn push_exit(&mut self, p: Point) {
        self.exit_points.push(p);
    }

    pub(crate) fn push_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    fn check_size(&self) -> Result<()> {
        if self.rect.width < MIN_ROOM_EDGE || self.rect.height < MIN_ROOM_EDGE {
            return Err(GenError::RoomTooSmall {
                width: self.rect.width,
                height: self.rect.height,
            });
        }
        Ok(())
    }

    /// Local rectangle anchored at the origin
    fn local_rect(&self) -> Rect {
        Rect::new(0, 0, self.rect.width, self.rect.height)
    }

    fn is_interior(&self, local: Point) -> bool {
        local.x >= 1 && local.y >= 1 && local.x < self.rect.width - 1 && local.y < self.rect.height - 1
    }

    /// Wall ring around a floor interior
    fn build_shell(&mut self) -> Result<()> {
        self.check_size()?;
        self.grid = Grid::new(self.rect.width, self.rect.height, TileKind::Wall);
        for y in 1..self.rect.height - 1 {
            for x in 1..self.rect.width - 1 {
                self.grid.set(Point::new(x, y), TileKind::Floor);
            }
        }
        Ok(())
    }

    fn ensure_shell(&mut self) -> Result<()> {
        if self.grid.width() != self.rect.width || self.grid.height() != self.rect.height {
            self.build_shell()?;
        }
        Ok(())
    }

    /// Synthesize the room interior around an entry point
    ///
    /// `entry` is in the parent's coordinate space and must lie inside the
    /// room. The local grid is rebuilt from walls and earlier exits are
    /// dropped along with it; entities are appended to whatever the room
    /// already holds, and an existing player is moved to the entry. Returns the room seed, which replays the same
    /// interior when fed to a fresh room with the same rectangle and entry.
    pub fn generate_interior(&mut self, entry: Point) -> Result<u64> {
        self.check_size()?;
        if !self.rect.contains(entry) {
            return Err(GenError::EntryOutOfBounds {
                x: entry.x,
                y: entry.y,
            });
        }

        let local_entry = self.rect.to_local(entry);
        self.grid = Grid::new(self.rect.width, self.rect.height, TileKind::Wall);
        self.grid.set(local_entry, TileKind::Door);
        self.entry_point = Some(entry);
        self.exit_points.clear();

        self.carve_layout(local_entry);
        self.place_features();
        self.place_room_entities();
        if !self.dead_end {
            self.place_room_exits(local_entry);
        }

        let behind = self.entry_door_point(local_entry);
        if self.grid.in_bounds(behind) {
            self.grid.set(behind, TileKind::Door);
        }

        match self.entities.iter().position(Entity::is_player) {
            Some(i) => self.entities[i].pos = entry,
            None => self.entities.push(Entity::new(EntityKind::Player, entry)),
        }

        debug!(
            "room {:?} seed {}: {} exits, {} entities",
            self.rect,
            self.seed(),
            self.exit_points.len(),
            self.entities.len()
        );
        Ok(self.seed())
    }

    /// Floor the interior and scatter pillars away from the border
    fn carve_layout(&mut self, local_entry: Point) {
        let (w, h) = (self.rect.width, self.rect.height);
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let p = Point::new(x, y);
                if p != local_entry {
                    self.grid.set(p, TileKind::Floor);
                }
            }
        }

        for y in 2..h - 2 {
            for x in 2..w - 2 {
                let p = Point::new(x, y);
                if self.rng.percent(OBSTACLE_PERCENT) && p != local_entry {
                    self.grid.set(p, TileKind::Wall);
                }
            }
        }
    }

    fn place_features(&mut self) {
        let count = MIN_FEATURES + self.rng.rn2(MAX_FEATURES - MIN_FEATURES + 1);
        for _ in 0..count {
            let Some(&feature) = self.rng.choose(&TileKind::FEATURES) else {
                continue;
            };
            match self.find_empty_tile() {
                Some(p) => {
                    self.grid.set(p, feature);
                }
                None => warn!("room {:?}: no free tile for {}", self.rect, feature),
            }
        }
    }

    fn place_room_entities(&mut self) {
        let count = MIN_ROOM_ENTITIES + self.rng.rn2(MAX_ROOM_ENTITIES - MIN_ROOM_ENTITIES + 1);
        for _ in 0..count {
            let Some(&kind) = self.rng.choose(&EntityKind::ROOM_POPULATION) else {
                continue;
            };
            match self.find_empty_tile() {
                Some(p) => {
                    let pos = self.rect.to_parent(p);
                    self.entities.push(Entity::new(kind, pos));
                }
                None => warn!("room {:?}: no free tile for {}", self.rect, kind),
            }
        }
    }

    /// Find a local interior floor tile
    ///
    /// Random draws first; once those run out, any walkable interior tile
    /// other than a door qualifies. `None` when nothing is left.
    fn find_empty_tile(&mut self) -> Option<Point> {
        let (w, h) = (self.rect.width, self.rect.height);
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let x = 1 + self.rng.rn2((w - 2) as u32) as i32;
            let y = 1 + self.rng.rn2((h - 2) as u32) as i32;
            let p = Point::new(x, y);
            if self.grid.is_kind(p, TileKind::Floor) {
                return Some(p);
            }
        }

        trace!("room {:?}: relaxing empty tile search", self.rect);
        let candidates: Vec<Point> = self
            .grid
            .points()
            .filter(|&p| {
                self.is_interior(p)
                    && self.grid.is_walkable(p)
                    && !self.grid.get(p).is_some_and(TileKind::is_door)
            })
            .collect();
        self.rng.choose(&candidates).copied()
    }

    fn place_room_exits(&mut self, local_entry: Point) {
        let count = MIN_EXITS + self.rng.rn2(MAX_EXITS - MIN_EXITS + 1);
        let perimeter = self.local_rect().perimeter();
        for i in self.rng.sample_indices(perimeter.len(), count as usize) {
            let p = perimeter[i];
            if p == local_entry {
                continue;
            }
            self.grid.set(p, TileKind::Door);
            self.exit_points.push(self.rect.to_parent(p));
        }
    }

    /// Local point of the door behind a local entry point
    ///
    /// An entry on the left or right column backs onto the tile one step
    /// vertically away from the horizontal midline; an entry on row 1 or the
    /// last row backs onto the tile one step horizontally away from the
    /// vertical midline. Otherwise the first in-bounds neighbour of up, down,
    /// right, left is used, falling back to the entry itself.
    pub fn entry_door_point(&self, local_entry: Point) -> Point {
        let (w, h) = (self.rect.width, self.rect.height);
        let Point { x: dx, y: dy } = local_entry;

        if dx == 0 || dx == w - 1 {
            let step = if dy > h / 2 { 1 } else { -1 };
            return Point::new(dx, dy + step);
        }
        if dy == 1 || dy == h - 1 {
            let step = if dx > w / 2 { 1 } else { -1 };
            return Point::new(dx + step, dy);
        }

        [(0, -1), (0, 1), (1, 0), (-1, 0)]
            .into_iter()
            .map(|(ox, oy)| local_entry.offset(ox, oy))
            .find(|p| p.in_bounds(w, h))
            .unwrap_or(local_entry)
    }

    /// Random non-corner point on a wall, in local coordinates
    fn side_point(&mut self, side: Side) -> Point {
        let (w, h) = (self.rect.width, self.rect.height);
        match side {
            Side::Top => Point::new(1 + self.rng.rn2((w - 2) as u32) as i32, 0),
            Side::Bottom => Point::new(1 + self.rng.rn2((w - 2) as u32) as i32, h - 1),
            Side::Left => Point::new(0, 1 + self.rng.rn2((h - 2) as u32) as i32),
            Side::Right => Point::new(w - 1, 1 + self.rng.rn2((h - 2) as u32) as i32),
        }
    }

    fn pick_side(&mut self, side: Option<Side>) -> Side {
        match side {
            Some(side) => side,
            None => *self.rng.choose(&Side::ALL).unwrap_or(&Side::Top),
        }
    }

    /// Put a door on a wall and make it the entry point
    ///
    /// A random side is used when `side` is `None`.
    pub fn place_entry(&mut self, side: Option<Side>) -> Result<Point> {
        self.ensure_shell()?;
        let side = self.pick_side(side);
        let local = self.side_point(side);
        self.grid.set(local, TileKind::Door);
        let entry = self.rect.to_parent(local);
        self.entry_point = Some(entry);
        trace!("room {:?}: entry on {} at {:?}", self.rect, side, entry);
        Ok(entry)
    }

    /// Put an exit door on a wall, away from the entry
    ///
    /// Draws that land closer to the entry than half the room's longer edge
    /// are retried on the opposite side; once the attempts run out the
    /// farthest draw is taken. Dead-end rooms have no exit.
    pub fn place_exit(&mut self, side: Option<Side>) -> Result<Point> {
        if self.dead_end {
            return Err(GenError::DeadEnd);
        }
        self.ensure_shell()?;

        let min_distance = f64::from(self.rect.width.max(self.rect.height)) / 2.0;
        let entry = self.entry_point.map(|p| self.rect.to_local(p));
        let mut side = self.pick_side(side);
        let mut best: Option<(Point, f64)> = None;

        for _ in 0..MAX_EXIT_ATTEMPTS {
            self.exit_attempts += 1;
            let candidate = self.side_point(side);
            if Some(candidate) == entry {
                side = side.opposite();
                continue;
            }

            let distance = entry.map_or(f64::INFINITY, |e| e.distance(candidate));
            if best.is_none_or(|(_, d)| distance > d) {
                best = Some((candidate, distance));
            }
            if distance >= min_distance {
                break;
            }
            side = side.opposite();
        }

        let local = match best {
            Some((p, distance)) if distance >= min_distance => p,
            Some((p, _)) => {
                debug!("room {:?}: settling for exit {:?} near the entry", self.rect, p);
                p
            }
            // Every draw hit the entry; take the opposite wall outright
            None => {
                self.exit_attempts += 1;
                let opposite = side.opposite();
                self.side_point(opposite)
            }
        };

        self.grid.set(local, TileKind::Door);
        let exit = self.rect.to_parent(local);
        self.exit_points.push(exit);
        Ok(exit)
    }

    /// Is the parent-space point a walkable tile of this room
    pub fn is_tile_walkable(&self, p: Point) -> bool {
        self.rect.contains(p) && self.grid.is_walkable(self.rect.to_local(p))
    }

    /// Walkable neighbours of a parent-space point
    pub fn tile_neighbors(&self, p: Point, connectivity: Connectivity) -> Vec<Point> {
        connectivity
            .offsets()
            .map(|(dx, dy)| p.offset(dx, dy))
            .filter(|&n| self.is_tile_walkable(n))
            .collect()
    }

    /// Walkable path from the entry to the first exit
    ///
    /// Empty when the room lacks an entry or exit or the two are not
    /// connected.
    pub fn path_to_exit(&self) -> Result<Vec<Point>> {
        if self.dead_end {
            return Err(GenError::DeadEnd);
        }
        let (Some(entry), Some(&exit)) = (self.entry_point, self.exit_points.first()) else {
            return Ok(Vec::new());
        };
        Ok(find_path(entry, exit, |p| {
            self.tile_neighbors(p, Connectivity::Four)
        }))
    }

    /// Copy of the local grid with the player stamped on the entry
    pub fn marked_grid(&self) -> Grid {
        let mut grid = self.grid.clone();
        if let Some(entry) = self.entry_point {
            grid.set(self.rect.to_local(entry), TileKind::Player);
        }
        grid
    }
}
