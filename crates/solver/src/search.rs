//! Shortest grid-path search.
//!
//! Best-first search over an implicit, unobstructed 8-connected integer
//! grid: axis steps cost 1, diagonal steps cost sqrt(2), and the heuristic
//! is the Chebyshev distance to the goal. The search is goal-biased in two
//! deliberate ways that keep its frontier small:
//!
//! - steps whose dot product with the goal bearing is negative are never
//!   queued (the path may only hold position or advance toward the goal),
//! - a coordinate is finalized the first time it leaves the frontier and a
//!   queued coordinate is never re-queued or updated, even when a later
//!   route would reach it cheaper.
//!
//! Both rules are part of the observable contract: callers compare the
//! returned lengths against claimed distances, so changing the bias would
//! silently change every verdict built on top of it. On an open grid the
//! result still equals the true optimum, one diagonal step per shared
//! axis delta plus axis steps for the remainder.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::f64::consts::SQRT_2;

use roadcheck_protocol::Position;

/// The eight moves in fixed order: four axis steps, then four diagonals.
/// Queue insertion order follows this order, so it takes part in
/// tie-breaking among equal-cost frontier entries.
const STEPS: [(i64, i64, f64); 8] = [
    (0, -1, 1.0),
    (1, 0, 1.0),
    (0, 1, 1.0),
    (-1, 0, 1.0),
    (-1, -1, SQRT_2),
    (1, -1, SQRT_2),
    (1, 1, SQRT_2),
    (-1, 1, SQRT_2),
];

/// True shortest grid-path length from `start` to `goal`, or `None` when
/// the frontier empties without reaching the goal.
///
/// `None` cannot happen on the unobstructed grid this searches (the two
/// perpendicular steps always survive the bearing prune), so callers treat
/// it as an exceptional outcome rather than a normal one.
pub fn shortest_path_length(start: Position, goal: Position) -> Option<f64> {
    let (length, expanded) = best_first_search(start, goal);
    log::trace!(
        "path search ({},{}) -> ({},{}): length={:?} expanded={}",
        start.x,
        start.y,
        goal.x,
        goal.y,
        length,
        expanded
    );
    if let Some(found) = length {
        // A grid path can never undercut the straight line between its ends.
        debug_assert!(found + 1e-9 >= euclidean_distance(start, goal));
    }
    length
}

/// Straight-line distance between two grid positions.
pub fn euclidean_distance(a: Position, b: Position) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

fn chebyshev(a: Position, b: Position) -> f64 {
    (a.x - b.x).abs().max((a.y - b.y).abs()) as f64
}

/// A step points away from the goal when its dot product with the bearing
/// is negative. Perpendicular steps (dot product zero) are kept.
fn points_away(bearing_x: i64, bearing_y: i64, dx: i64, dy: i64) -> bool {
    bearing_x * dx + bearing_y * dy < 0
}

struct Node {
    position: Position,
    g: f64,
    f: f64,
    seq: u64,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    // Reversed so the max-heap pops the smallest f first; among equal f the
    // earliest-queued entry wins, keeping tie-breaks stable.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Runs the search and reports the number of expanded (finalized) nodes
/// alongside the result. The counter is how the goal-bias is observed from
/// the outside; tests lean on it.
pub(crate) fn best_first_search(start: Position, goal: Position) -> (Option<f64>, usize) {
    let mut open = BinaryHeap::new();
    // Every coordinate ever queued. A coordinate enters the frontier at
    // most once, so the heap needs no lazy-deletion handling.
    let mut queued: HashSet<Position> = HashSet::new();
    let mut closed: HashSet<Position> = HashSet::new();
    let mut expanded = 0usize;
    let mut seq = 0u64;

    open.push(Node {
        position: start,
        g: 0.0,
        f: chebyshev(start, goal),
        seq,
    });
    queued.insert(start);

    while let Some(node) = open.pop() {
        if node.position == goal {
            return (Some(node.g), expanded);
        }
        closed.insert(node.position);
        expanded += 1;

        let bearing_x = goal.x - node.position.x;
        let bearing_y = goal.y - node.position.y;

        for &(dx, dy, cost) in &STEPS {
            let next = Position::new(node.position.x + dx, node.position.y + dy);
            if closed.contains(&next) {
                continue;
            }
            if points_away(bearing_x, bearing_y, dx, dy) {
                continue;
            }
            if queued.contains(&next) {
                continue;
            }
            seq += 1;
            let g = node.g + cost;
            open.push(Node {
                position: next,
                g,
                f: g + chebyshev(next, goal),
                seq,
            });
            queued.insert(next);
        }
    }

    (None, expanded)
}
