//! Grid geometry: points, rectangles, neighbourhoods and room sides

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::GenError;

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Straight-line distance to another point
    pub fn distance(self, other: Point) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }

    /// Is this point inside a `width` x `height` grid anchored at the origin
    pub const fn in_bounds(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < width && self.y < height
    }
}

/// Axis-aligned rectangle of tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Centre tile, rounding toward the origin
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Grow the rectangle by `margin` tiles on every side
    pub const fn expanded(&self, margin: i32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.width + 2 * margin,
            self.height + 2 * margin,
        )
    }

    /// Do two rectangles share at least one tile
    pub const fn intersects(&self, other: &Rect) -> bool {
        !(self.right() <= other.x
            || self.x >= other.right()
            || self.bottom() <= other.y
            || self.y >= other.bottom())
    }

    /// Check overlap after growing this rectangle by `margin`
    ///
    /// With a margin of one, rectangles must be separated by at least one tile.
    pub const fn overlaps(&self, other: &Rect, margin: i32) -> bool {
        self.expanded(margin).intersects(other)
    }

    /// Translate a point from the parent space into rectangle-local offsets
    pub const fn to_local(&self, p: Point) -> Point {
        Point::new(p.x - self.x, p.y - self.y)
    }

    /// Translate rectangle-local offsets into the parent space
    pub const fn to_parent(&self, p: Point) -> Point {
        Point::new(p.x + self.x, p.y + self.y)
    }

    /// Local perimeter coordinates
    ///
    /// Top and bottom rows column by column, then the left and right columns
    /// row by row, skipping the corners already listed.
    pub fn perimeter(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity((2 * (self.width + self.height)).max(0) as usize);
        for x in 0..self.width {
            points.push(Point::new(x, 0));
            points.push(Point::new(x, self.height - 1));
        }
        for y in 1..self.height - 1 {
            points.push(Point::new(0, y));
            points.push(Point::new(self.width - 1, y));
        }
        points
    }
}

/// Neighbourhood used when stepping between tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Connectivity {
    #[default]
    Four,
    Eight,
}

static CARDINAL: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
static DIAGONAL: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

impl Connectivity {
    /// Step offsets: up, down, left, right, then diagonals for `Eight`
    pub fn offsets(self) -> impl Iterator<Item = (i32, i32)> {
        let diagonals = match self {
            Connectivity::Four => &DIAGONAL[..0],
            Connectivity::Eight => &DIAGONAL[..],
        };
        CARDINAL.iter().chain(diagonals).copied()
    }
}

/// Adjacent points of `p` within a `width` x `height` grid
pub fn neighbors(
    p: Point,
    connectivity: Connectivity,
    width: i32,
    height: i32,
) -> impl Iterator<Item = Point> {
    connectivity
        .offsets()
        .map(move |(dx, dy)| p.offset(dx, dy))
        .filter(move |n| n.in_bounds(width, height))
}

/// Wall of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    pub const fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl FromStr for Side {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" | "t" => Ok(Side::Top),
            "bottom" | "b" => Ok(Side::Bottom),
            "left" | "l" => Ok(Side::Left),
            "right" | "r" => Ok(Side::Right),
            _ => Err(GenError::InvalidSide(s.to_string())),
        }
    }
}

impl TryFrom<char> for Side {
    type Error = GenError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            't' => Ok(Side::Top),
            'b' => Ok(Side::Bottom),
            'l' => Ok(Side::Left),
            'r' => Ok(Side::Right),
            _ => Err(GenError::InvalidSide(c.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(5, 5, 5, 5);
        let b = Rect::new(8, 8, 5, 5);
        let c = Rect::new(15, 15, 5, 5);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.overlaps(&c, 15));
    }

    #[test]
    fn test_touching_rooms_overlap_with_margin() {
        let a = Rect::new(1, 1, 4, 4);
        // Directly adjacent to `a`, no tile between them
        let b = Rect::new(5, 1, 4, 4);
        assert!(!a.intersects(&b));
        assert!(a.overlaps(&b, 1));
        assert!(b.overlaps(&a, 1));

        // One wall column between them
        let c = Rect::new(6, 1, 4, 4);
        assert!(!a.overlaps(&c, 1));
        assert!(!c.overlaps(&a, 1));

        // Diagonal contact counts as touching
        let d = Rect::new(5, 5, 2, 2);
        assert!(a.overlaps(&d, 1));
    }

    #[test]
    fn test_center_and_contains() {
        let r = Rect::new(2, 3, 5, 4);
        assert_eq!(r.center(), Point::new(4, 5));
        assert!(r.contains(Point::new(2, 3)));
        assert!(r.contains(Point::new(6, 6)));
        assert!(!r.contains(Point::new(7, 6)));
        assert!(!r.contains(Point::new(1, 3)));
    }

    #[test]
    fn test_local_parent_roundtrip() {
        let r = Rect::new(10, 20, 5, 5);
        let p = Point::new(12, 23);
        assert_eq!(r.to_local(p), Point::new(2, 3));
        assert_eq!(r.to_parent(r.to_local(p)), p);
    }

    #[test]
    fn test_perimeter_order() {
        let r = Rect::new(0, 0, 3, 3);
        let perimeter = r.perimeter();
        assert_eq!(
            perimeter,
            vec![
                Point::new(0, 0),
                Point::new(0, 2),
                Point::new(1, 0),
                Point::new(1, 2),
                Point::new(2, 0),
                Point::new(2, 2),
                Point::new(0, 1),
                Point::new(2, 1),
            ]
        );
    }

    #[test]
    fn test_neighbors_clip_to_bounds() {
        let corner: Vec<_> = neighbors(Point::new(0, 0), Connectivity::Four, 5, 5).collect();
        assert_eq!(corner, vec![Point::new(0, 1), Point::new(1, 0)]);

        let inner = neighbors(Point::new(2, 2), Connectivity::Eight, 5, 5).count();
        assert_eq!(inner, 8);
    }

    #[test]
    fn test_distance() {
        assert_eq!(Point::new(0, 0).distance(Point::new(3, 4)), 5.0);
        assert_eq!(Point::new(1, 1).distance(Point::new(1, 1)), 0.0);
    }

    #[test]
    fn test_side_parsing() {
        assert_eq!("top".parse::<Side>().unwrap(), Side::Top);
        assert_eq!(" Right ".parse::<Side>().unwrap(), Side::Right);
        assert_eq!(Side::try_from('b').unwrap(), Side::Bottom);
        assert!(matches!(
            "middle".parse::<Side>(),
            Err(GenError::InvalidSide(s)) if s == "middle"
        ));
        assert!(Side::try_from('x').is_err());
    }

    #[test]
    fn test_side_opposite() {
        for side in Side::ALL {
            assert_eq!(side.opposite().opposite(), side);
            assert_ne!(side.opposite(), side);
        }
    }
}
