//! Layout engine: converts a commit graph into drawing primitives.
//!
//! DESIGN
//! ======
//! Every commit sits on a fixed grid slot. Connectors to parents in the same
//! column are straight. Connectors that change column travel vertically in a
//! lane and jog horizontally at the ends; the lane is the first column at or
//! right of an anchor whose vertical span is not yet claimed, so connectors
//! never overlap an existing vertical run. Claims accumulate in an
//! [`OccupancyMap`] owned by this layout pass.
//!
//! ERROR HANDLING
//! ==============
//! A parent id that is not in the graph is reported before any routing
//! happens, so a failed layout never yields a partial drawing.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::debug;

use super::consts::{HIGHLIGHT, INK, POINT_OFFSET, POINT_SIZE, SURFACE_WIDTH, X_SPACE, Y_SPACE};
use super::draw::{Drawing, Label, Point, Polyline, Rect, series_color};
use super::node::{CommitGraph, CommitId, CommitNode};
use super::occupancy::OccupancyMap;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("commit {commit} references unknown parent {parent}")]
    MissingParent { commit: CommitId, parent: CommitId },
}

/// Grid geometry in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Column spacing; also the lane search step.
    pub x_space: i64,
    /// Row spacing.
    pub y_space: i64,
    pub point_offset: i64,
    pub point_size: i64,
    pub surface_width: i64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            x_space: X_SPACE,
            y_space: Y_SPACE,
            point_offset: POINT_OFFSET,
            point_size: POINT_SIZE,
            surface_width: SURFACE_WIDTH,
        }
    }
}

/// Lookup entry for the commit drawn on a given row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEntry {
    pub commit: CommitId,
    pub url: String,
    /// Top of the commit's point.
    pub y: i64,
}

/// One layout pass over a graph.
#[derive(Debug)]
pub struct GraphLayout {
    config: LayoutConfig,
    occupancy: OccupancyMap,
    /// Rightmost lane seen; bounds the label scan.
    max_x: i64,
    drawing: Drawing,
    rows: BTreeMap<u32, RowEntry>,
}

// =============================================================================
// LAYOUT
// =============================================================================

impl GraphLayout {
    /// Lay out `graph` on a fresh surface.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::MissingParent`] if any commit names a parent
    /// absent from the graph.
    pub fn compute(graph: &CommitGraph, config: LayoutConfig) -> Result<Self, LayoutError> {
        let order = graph.ordered();
        let edges = resolve_edges(graph, &order)?;

        let mut layout = Self {
            config,
            occupancy: OccupancyMap::new(config.y_space),
            max_x: config.x_space * i64::from(graph.next_column),
            drawing: Drawing {
                width: config.surface_width,
                height: (i64::from(graph.max_row) + 1) * config.y_space,
                ..Drawing::default()
            },
            rows: BTreeMap::new(),
        };

        // Points are claimed up front so connectors route around them.
        for node in &order {
            let (x, y) = layout.position(node);
            layout.occupancy.claim_point(x, y);
        }

        for (child, parents) in &edges {
            for (index, parent) in parents.iter().enumerate() {
                let line = layout.route_edge(child, parent, index);
                layout.drawing.lines.push(line);
            }
        }

        for node in &order {
            layout.place_point(node);
        }

        debug!(
            commits = order.len(),
            connectors = layout.drawing.lines.len(),
            lanes = layout.occupancy.claimed_columns(),
            "commit graph laid out"
        );
        Ok(layout)
    }

    #[must_use]
    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    #[must_use]
    pub fn into_drawing(self) -> Drawing {
        self.drawing
    }

    #[must_use]
    pub fn occupancy(&self) -> &OccupancyMap {
        &self.occupancy
    }

    /// Top-left corner of a commit's point.
    #[must_use]
    pub fn position(&self, node: &CommitNode) -> (i64, i64) {
        let c = self.config;
        (c.x_space + i64::from(node.column) * c.x_space, c.y_space + i64::from(node.row) * c.y_space)
    }

    /// The commit drawn at surface coordinate `y`, if any.
    #[must_use]
    pub fn row_at(&self, y: i64) -> Option<&RowEntry> {
        if y < 0 {
            return None;
        }
        let slot = y / self.config.y_space - 1;
        let Ok(row) = u32::try_from(slot) else {
            return None;
        };
        self.rows.get(&row)
    }

    /// Highlight band spanning the surface behind `row`.
    #[must_use]
    pub fn highlight(&self, row: u32) -> Option<Rect> {
        let entry = self.rows.get(&row)?;
        Some(Rect {
            x: 0,
            y: entry.y - self.config.y_space / 4,
            width: self.config.surface_width,
            height: self.config.y_space,
            fill: HIGHLIGHT,
        })
    }

    fn route_edge(&mut self, child: &CommitNode, parent: &CommitNode, index: usize) -> Polyline {
        let po = self.config.point_offset;
        let (x, y) = self.position(child);
        let (px, py) = self.position(parent);
        let (lo, hi) = (y.min(py), y.max(py));

        let mut points = vec![Point::new(x + po, y + po)];
        let mut series = child.series;

        match parent.column.cmp(&child.column) {
            Ordering::Equal => {
                points.push(Point::new(px + po, py + po));
                self.occupancy.claim_span(x, y, py);
            }
            Ordering::Greater => {
                let lane = self.find_lane(px, lo + 2 * po, hi - 1);
                points.push(Point::new(lane + po, y + 2 * po));
                points.push(Point::new(lane + po, py));
                if lane != px {
                    debug!(commit = %child.id, parent = %parent.id, anchor = px, lane, "connector rerouted");
                    points.push(Point::new(px + po, py + po));
                }
                self.occupancy.claim_span(lane, y, py);
                series = parent.series;
            }
            Ordering::Less => {
                let lane = self.find_lane(x, lo + 3 * po, hi - po);
                if lane != x {
                    debug!(commit = %child.id, parent = %parent.id, anchor = x, lane, "connector rerouted");
                    points.push(Point::new(lane + po, y + 2 * po));
                }
                points.push(Point::new(lane + po, py));
                points.push(Point::new(px + po, py + po));
                self.occupancy.claim_span(lane, y, py);
                // Merge edges take the color of the branch they bring in.
                if index > 0 {
                    series = parent.series;
                }
            }
        }

        points.dedup();
        Polyline { from: child.id.clone(), to: parent.id.clone(), points, series, stroke: series_color(series) }
    }

    fn find_lane(&mut self, anchor: i64, y1: i64, y2: i64) -> i64 {
        let lane = self.occupancy.free_lane(anchor, y1, y2, self.config.x_space);
        self.max_x = self.max_x.max(lane);
        lane
    }

    fn place_point(&mut self, node: &CommitNode) {
        let c = self.config;
        let (x, y) = self.position(node);
        self.drawing.points.push(Rect { x, y, width: c.point_size, height: c.point_size, fill: INK });

        let end = self.max_x.max(x);
        let label_x = self
            .occupancy
            .columns_claiming(x, end, y)
            .last()
            .map_or(x, |col| col + 2 * c.x_space);
        self.drawing.labels.push(Label { commit: node.id.clone(), x: label_x, y, text: node.message.clone() });

        self.rows.insert(node.row, RowEntry { commit: node.id.clone(), url: node.url.clone(), y });
    }
}

/// Look up every parent up front.
fn resolve_edges<'g>(
    graph: &'g CommitGraph,
    order: &[&'g CommitNode],
) -> Result<Vec<(&'g CommitNode, Vec<&'g CommitNode>)>, LayoutError> {
    order
        .iter()
        .map(|child| {
            let parents = child
                .parents
                .iter()
                .map(|pid| {
                    graph
                        .get(pid)
                        .ok_or_else(|| LayoutError::MissingParent { commit: child.id.clone(), parent: pid.clone() })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok((*child, parents))
        })
        .collect()
}
