//! A* pathfinding over tile grids

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use super::geometry::Point;

/// A* node for the priority queue
#[derive(Debug, Clone, Copy)]
struct AStarNode {
    pos: Point,
    g_cost: f64, // Cost from start
    f_cost: f64, // g_cost + heuristic
    seq: u64,    // Insertion order, breaks ties
}

impl PartialEq for AStarNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AStarNode {}

impl Ord for AStarNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f_cost
            .total_cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for AStarNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reconstruct path from came_from map
fn reconstruct_path(came_from: &HashMap<Point, Point>, end: Point) -> Vec<Point> {
    let mut path = vec![end];
    let mut current = end;

    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }

    path.reverse();
    path
}

/// Find a path from `start` to `goal` with A*
///
/// `neighbors` yields the walkable tiles reachable in one step; it owns all
/// bounds and walkability checks. Step cost and heuristic are both Euclidean
/// distance. Nodes with equal estimated cost are expanded in insertion order,
/// so results are deterministic.
///
/// Returns the path including both endpoints, or an empty vector when `goal`
/// cannot be reached.
pub fn find_path<F, I>(start: Point, goal: Point, mut neighbors: F) -> Vec<Point>
where
    F: FnMut(Point) -> I,
    I: IntoIterator<Item = Point>,
{
    let mut open_set = BinaryHeap::new();
    let mut g_scores: HashMap<Point, f64> = HashMap::new();
    let mut came_from: HashMap<Point, Point> = HashMap::new();
    let mut seq = 0u64;

    g_scores.insert(start, 0.0);
    open_set.push(AStarNode {
        pos: start,
        g_cost: 0.0,
        f_cost: start.distance(goal),
        seq,
    });

    while let Some(current) = open_set.pop() {
        if current.pos == goal {
            return reconstruct_path(&came_from, goal);
        }

        // Skip entries superseded by a cheaper route
        if g_scores
            .get(&current.pos)
            .is_some_and(|&best| current.g_cost > best)
        {
            continue;
        }

        for next in neighbors(current.pos) {
            let new_g = current.g_cost + current.pos.distance(next);

            if g_scores.get(&next).is_none_or(|&old| new_g < old) {
                g_scores.insert(next, new_g);
                came_from.insert(next, current.pos);

                seq += 1;
                open_set.push(AStarNode {
                    pos: next,
                    g_cost: new_g,
                    f_cost: new_g + next.distance(goal),
                    seq,
                });
            }
        }
    }

    Vec::new()
}
