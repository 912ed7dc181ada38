//! Fixed-size row-major tile grid

use serde::{Deserialize, Serialize};

use super::geometry::{Connectivity, Point, neighbors};
use super::tile::{Tile, TileKind};

/// Row-major grid of tile kinds
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
}

impl Grid {
    /// Create a grid with every tile set to `fill`
    ///
    /// Negative dimensions produce an empty grid.
    pub fn new(width: i32, height: i32, fill: TileKind) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![fill; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.in_bounds(self.width, self.height)
    }

    fn index(&self, p: Point) -> Option<usize> {
        self.in_bounds(p)
            .then(|| (p.y * self.width + p.x) as usize)
    }

    /// Tile kind at `p`, or `None` outside the grid
    pub fn get(&self, p: Point) -> Option<TileKind> {
        self.index(p).map(|i| self.tiles[i])
    }

    /// Registry descriptor at `p`
    pub fn tile(&self, p: Point) -> Option<&'static Tile> {
        self.get(p).map(TileKind::tile)
    }

    /// Set the tile at `p`; returns false (and changes nothing) outside the grid
    pub fn set(&mut self, p: Point, kind: TileKind) -> bool {
        match self.index(p) {
            Some(i) => {
                self.tiles[i] = kind;
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, kind: TileKind) {
        self.tiles.fill(kind);
    }

    pub fn is_kind(&self, p: Point, kind: TileKind) -> bool {
        self.get(p) == Some(kind)
    }

    pub fn is_walkable(&self, p: Point) -> bool {
        self.get(p).is_some_and(TileKind::is_walkable)
    }

    /// In-bounds neighbours of `p`
    pub fn neighbors(&self, p: Point, connectivity: Connectivity) -> impl Iterator<Item = Point> {
        neighbors(p, connectivity, self.width, self.height)
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[TileKind]> {
        self.tiles.chunks(self.width.max(1) as usize)
    }

    /// All points in row-major order
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Point::new(x, y)))
    }

    /// Count tiles of a given kind
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&k| k == kind).count()
    }

    /// Glyph rows, one string per row
    pub fn glyph_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|k| k.glyph()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_filled() {
        let grid = Grid::new(4, 3, TileKind::Wall);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.count(TileKind::Wall), 12);
        assert_eq!(grid.rows().count(), 3);
    }

    #[test]
    fn test_get_set_bounds() {
        let mut grid = Grid::new(4, 3, TileKind::Wall);
        assert!(grid.set(Point::new(3, 2), TileKind::Floor));
        assert_eq!(grid.get(Point::new(3, 2)), Some(TileKind::Floor));
        assert!(!grid.set(Point::new(4, 0), TileKind::Floor));
        assert!(!grid.set(Point::new(0, -1), TileKind::Floor));
        assert_eq!(grid.get(Point::new(-1, 0)), None);
        assert!(grid.is_walkable(Point::new(3, 2)));
        assert!(!grid.is_walkable(Point::new(0, 0)));
    }

    #[test]
    fn test_row_major_layout() {
        let mut grid = Grid::new(3, 2, TileKind::Wall);
        grid.set(Point::new(2, 0), TileKind::Door);
        grid.set(Point::new(0, 1), TileKind::Floor);
        assert_eq!(grid.glyph_rows(), vec!["##+".to_string(), ".##".to_string()]);
    }

    #[test]
    fn test_fill_resets_every_tile() {
        let mut grid = Grid::new(3, 3, TileKind::Wall);
        grid.set(Point::new(1, 1), TileKind::Door);
        grid.fill(TileKind::Floor);
        assert_eq!(grid.count(TileKind::Floor), 9);
        assert_eq!(grid.get(Point::new(1, 1)), Some(TileKind::Floor));
    }

    #[test]
    fn test_points_cover_grid() {
        let grid = Grid::new(3, 2, TileKind::Floor);
        let points: Vec<_> = grid.points().collect();
        assert_eq!(points.len(), 6);
        assert_eq!(points[0], Point::new(0, 0));
        assert_eq!(points[5], Point::new(2, 1));
    }
}
