//! Corridor carving between rooms

use log::trace;

use crate::rng::GameRng;

use super::geometry::Point;
use super::grid::Grid;
use super::tile::TileKind;

/// Carve a winding corridor of floor from `start` to `end`
///
/// Each step draws a number in `[0, 1)`: above `windingness` the walk moves
/// along X, otherwise along Y. When the drawn axis is already aligned the
/// step goes along the other one, so the walk ends after exactly
/// `|dx| + |dy|` steps. Steps that leave the grid are not carved.
///
/// Returns the number of tiles carved.
pub fn carve_corridor(
    grid: &mut Grid,
    start: Point,
    end: Point,
    windingness: f64,
    rng: &mut GameRng,
) -> usize {
    let mut current = start;
    let mut carved = 0;

    if grid.set(current, TileKind::Floor) {
        carved += 1;
    }

    while current != end {
        let dx = (end.x - current.x).signum();
        let dy = (end.y - current.y).signum();

        let along_x = rng.gen_f64() > windingness;
        current = if (along_x && dx != 0) || dy == 0 {
            current.offset(dx, 0)
        } else {
            current.offset(0, dy)
        };

        if grid.set(current, TileKind::Floor) {
            carved += 1;
        }
    }

    trace!("corridor {:?} -> {:?}: {} tiles", start, end, carved);
    carved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_points(grid: &Grid) -> Vec<Point> {
        grid.points()
            .filter(|&p| grid.is_kind(p, TileKind::Floor))
            .collect()
    }

    #[test]
    fn test_straight_corridor() {
        let mut grid = Grid::new(10, 5, TileKind::Wall);
        let mut rng = GameRng::new(1);
        let carved = carve_corridor(&mut grid, Point::new(1, 2), Point::new(8, 2), 0.2, &mut rng);
        assert_eq!(carved, 8);
        for x in 1..=8 {
            assert!(grid.is_kind(Point::new(x, 2), TileKind::Floor));
        }
    }

    #[test]
    fn test_corridor_length_is_manhattan() {
        let mut rng = GameRng::new(12345);
        for windingness in [0.0, 0.2, 0.5, 1.0] {
            let mut grid = Grid::new(30, 20, TileKind::Wall);
            let start = Point::new(2, 3);
            let end = Point::new(25, 17);
            let carved = carve_corridor(&mut grid, start, end, windingness, &mut rng);
            assert_eq!(carved, 23 + 14 + 1);
            assert_eq!(floor_points(&grid).len(), carved);
        }
    }

    #[test]
    fn test_corridor_is_connected() {
        let mut grid = Grid::new(20, 20, TileKind::Wall);
        let mut rng = GameRng::new(99);
        carve_corridor(&mut grid, Point::new(17, 2), Point::new(3, 15), 0.5, &mut rng);

        // Every carved tile except the end has a carved orthogonal neighbour
        let floors = floor_points(&grid);
        for p in &floors {
            let connected = [(0, -1), (0, 1), (-1, 0), (1, 0)]
                .iter()
                .any(|&(dx, dy)| grid.is_kind(p.offset(dx, dy), TileKind::Floor));
            assert!(connected, "isolated corridor tile at {:?}", p);
        }
    }

    #[test]
    fn test_zero_windingness_goes_x_first() {
        let mut grid = Grid::new(10, 10, TileKind::Wall);
        let mut rng = GameRng::new(5);
        carve_corridor(&mut grid, Point::new(1, 1), Point::new(6, 6), 0.0, &mut rng);
        // The elbow sits at the target column
        assert!(grid.is_kind(Point::new(6, 1), TileKind::Floor));
        assert!(!grid.is_kind(Point::new(1, 2), TileKind::Floor));
    }

    #[test]
    fn test_same_start_and_end() {
        let mut grid = Grid::new(5, 5, TileKind::Wall);
        let mut rng = GameRng::new(5);
        let carved = carve_corridor(&mut grid, Point::new(2, 2), Point::new(2, 2), 0.3, &mut rng);
        assert_eq!(carved, 1);
    }

    #[test]
    fn test_out_of_bounds_steps_skipped() {
        let mut grid = Grid::new(5, 5, TileKind::Wall);
        let mut rng = GameRng::new(5);
        let carved = carve_corridor(&mut grid, Point::new(-2, 2), Point::new(2, 2), 0.3, &mut rng);
        assert_eq!(carved, 3);
    }
}
