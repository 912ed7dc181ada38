use delve_core::dungeon::{Connectivity, Dungeon, Point, Room, RoomKind, Side, TileKind};
use delve_core::{DungeonConfig, GenError};
use proptest::prelude::*;

fn assert_walkable_path(room: &Room, path: &[Point]) {
    for pair in path.windows(2) {
        let d = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
        assert_eq!(d, 1, "non-adjacent step {:?} -> {:?}", pair[0], pair[1]);
    }
    assert!(path.iter().all(|&p| room.is_tile_walkable(p)));
    let mut unique = path.to_vec();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), path.len(), "path revisits a tile");
}

#[test]
fn test_room_replays_from_seed() {
    let mut room = Room::new(0, 0, 10, 10, RoomKind::Normal, Some(1337));
    let seed = room.generate_interior(Point::new(5, 0)).unwrap();

    let mut replay = Room::new(0, 0, 10, 10, RoomKind::Normal, Some(seed));
    replay.generate_interior(Point::new(5, 0)).unwrap();

    assert_eq!(room.grid(), replay.grid());
    assert_eq!(room.entities(), replay.entities());
    assert_eq!(room.exit_points(), replay.exit_points());
}

#[test]
fn test_offset_room_uses_parent_coordinates() {
    let mut room = Room::new(20, 10, 8, 6, RoomKind::Treasure, Some(4));
    room.generate_interior(Point::new(24, 11)).unwrap();

    assert_eq!(room.entry_point(), Some(Point::new(24, 11)));
    for e in room.entities() {
        assert!(room.contains(e.pos), "entity {:?} outside room", e);
    }
    for &exit in room.exit_points() {
        assert!(room.contains(exit));
        assert_eq!(room.grid().get(room.rect().to_local(exit)), Some(TileKind::Door));
    }
}

#[test]
fn test_dungeon_room_interior() {
    let dungeon = Dungeon::with_seed(DungeonConfig::default(), 2718).unwrap();
    let mut room = dungeon.rooms()[0].clone();
    let scattered = room.entities().len();
    let had_player = room.entities().iter().any(|e| e.is_player());
    let entry = Point::new(room.x() + 1, room.y());

    let seed = dungeon.generate_room(&mut room, entry.x, entry.y).unwrap();
    assert_eq!(seed, dungeon.rooms()[0].seed());

    // Scattered entities are kept and an existing player is reused
    let players = room.entities().iter().filter(|e| e.is_player()).count();
    assert_eq!(players, 1);
    let added = room.entities().len() - scattered;
    if had_player {
        assert!((1..=4).contains(&added));
    } else {
        assert!((2..=5).contains(&added));
    }
}

#[test]
fn test_interior_entry_validation() {
    let dungeon = Dungeon::with_seed(DungeonConfig::default(), 1).unwrap();
    let mut room = Room::new(3, 3, 6, 6, RoomKind::Normal, Some(1));
    assert!(matches!(
        dungeon.generate_room(&mut room, 100, 100),
        Err(GenError::EntryOutOfBounds { x: 100, y: 100 })
    ));
}

#[test]
fn test_side_text_round_trip() {
    for side in Side::ALL {
        let parsed: Side = side.to_string().parse().unwrap();
        assert_eq!(parsed, side);
    }
    assert!(matches!("north".parse::<Side>(), Err(GenError::InvalidSide(_))));
}

#[test]
fn test_entry_on_each_side_has_path() {
    for side in Side::ALL {
        let mut room = Room::new(0, 0, 9, 7, RoomKind::Normal, Some(12));
        room.place_entry(Some(side)).unwrap();
        room.place_exit(Some(side.opposite())).unwrap();
        let path = room.path_to_exit().unwrap();
        assert!(!path.is_empty(), "no path for entry on {side}");
        assert_walkable_path(&room, &path);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_standalone_room_is_traversable(
        seed in any::<u64>(),
        width in 3i32..20,
        height in 3i32..20,
    ) {
        let room = Room::standalone(width, height, Some(seed), false).unwrap();
        let entry = room.entry_point().unwrap();
        let exit = room.exit_points()[0];
        prop_assert!(room.is_tile_walkable(entry));
        prop_assert!(room.is_tile_walkable(exit));
        prop_assert_ne!(entry, exit);

        let path = room.path_to_exit().unwrap();
        prop_assert_eq!(path.first(), Some(&entry));
        prop_assert_eq!(path.last(), Some(&exit));
        assert_walkable_path(&room, &path);
    }

    #[test]
    fn prop_interior_path_is_valid_or_empty(
        seed in any::<u64>(),
        width in 5i32..16,
        height in 5i32..16,
    ) {
        let mut room = Room::new(0, 0, width, height, RoomKind::Normal, Some(seed));
        room.generate_interior(Point::new(width / 2, 0)).unwrap();
        prop_assert!(room.is_tile_walkable(Point::new(width / 2, 0)));

        let path = room.path_to_exit().unwrap();
        if let Some(&exit) = room.exit_points().first() {
            if !path.is_empty() {
                prop_assert_eq!(path.first(), Some(&Point::new(width / 2, 0)));
                prop_assert_eq!(path.last(), Some(&exit));
                assert_walkable_path(&room, &path);
            }
        } else {
            prop_assert!(path.is_empty());
        }
    }

    #[test]
    fn prop_neighbors_are_walkable(seed in any::<u64>()) {
        let room = Room::standalone(10, 8, Some(seed), true).unwrap();
        for p in room.grid().points() {
            for n in room.tile_neighbors(p, Connectivity::Eight) {
                prop_assert!(room.is_tile_walkable(n));
                prop_assert!((n.x - p.x).abs() <= 1 && (n.y - p.y).abs() <= 1);
            }
        }
    }
}
