//! Occupancy map: which vertical coordinates are already claimed per column.
//!
//! The layout claims a commit's point and every row a connector passes
//! through. Later connectors consult the map to find a lane whose vertical
//! span is still free. The map only grows during a render pass; a fresh map
//! is built for every layout.

#[cfg(test)]
#[path = "occupancy_test.rs"]
mod occupancy_test;

use std::collections::{BTreeMap, BTreeSet};

/// Per-column record of claimed vertical coordinates.
#[derive(Debug, Clone, Default)]
pub struct OccupancyMap {
    taken: BTreeMap<i64, BTreeSet<i64>>,
    row_step: i64,
}

impl OccupancyMap {
    /// Create an empty map. `row_step` is the vertical distance between rows;
    /// spans are claimed one row at a time.
    #[must_use]
    pub fn new(row_step: i64) -> Self {
        Self { taken: BTreeMap::new(), row_step: row_step.max(1) }
    }

    /// Claim a single coordinate.
    pub fn claim_point(&mut self, x: i64, y: i64) {
        self.taken.entry(x).or_default().insert(y);
    }

    /// Claim every row coordinate from `y1` to `y2` inclusive at column `x`.
    ///
    /// The span is normalized, so the order of `y1` and `y2` does not matter.
    pub fn claim_span(&mut self, x: i64, y1: i64, y2: i64) {
        let (lo, hi) = (y1.min(y2), y1.max(y2));
        let ys = self.taken.entry(x).or_default();
        let mut y = lo;
        while y <= hi {
            ys.insert(y);
            y += self.row_step;
        }
    }

    /// `true` if any claimed coordinate at `x` falls within `[y1, y2]`.
    ///
    /// An empty span (`y1 > y2`) never collides.
    #[must_use]
    pub fn collides(&self, x: i64, y1: i64, y2: i64) -> bool {
        if y1 > y2 {
            return false;
        }
        self.taken
            .get(&x)
            .is_some_and(|ys| ys.range(y1..=y2).next().is_some())
    }

    /// Find the lowest lane at or right of `anchor`, stepping by `lane_step`,
    /// whose span `[y1, y2]` is unclaimed.
    ///
    /// Every colliding candidate is a claimed column, so at most
    /// `claimed_columns() + 1` candidates are examined.
    #[must_use]
    pub fn free_lane(&self, anchor: i64, y1: i64, y2: i64, lane_step: i64) -> i64 {
        let step = lane_step.max(1);
        let mut x = anchor;
        for _ in 0..=self.taken.len() {
            if !self.collides(x, y1, y2) {
                break;
            }
            x += step;
        }
        x
    }

    #[must_use]
    pub fn is_claimed(&self, x: i64, y: i64) -> bool {
        self.taken.get(&x).is_some_and(|ys| ys.contains(&y))
    }

    /// Number of distinct columns holding at least one claim.
    #[must_use]
    pub fn claimed_columns(&self) -> usize {
        self.taken.len()
    }

    /// Claimed columns within `[x1, x2]` whose set contains `y`, ascending.
    pub fn columns_claiming(&self, x1: i64, x2: i64, y: i64) -> impl Iterator<Item = i64> + '_ {
        let range = if x1 <= x2 { x1..=x2 } else { x2..=x1 };
        self.taken
            .range(range)
            .filter(move |(_, ys)| ys.contains(&y))
            .map(|(x, _)| *x)
    }
}
