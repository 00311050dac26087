//! Drawing primitives produced by the layout.
//!
//! A [`Drawing`] is everything a surface needs: filled squares for commits,
//! colored polylines for parent connectors, and positioned text labels. It
//! serializes to JSON for external surfaces and renders to SVG via
//! [`crate::graph::svg`].

use serde::Serialize;

use super::consts::PALETTE;
use super::node::CommitId;

/// A point in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    #[must_use]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned filled rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub fill: &'static str,
}

/// Connector from a commit to one of its parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Polyline {
    pub from: CommitId,
    pub to: CommitId,
    pub points: Vec<Point>,
    pub series: u32,
    pub stroke: &'static str,
}

impl Polyline {
    /// `true` when the connector is one straight vertical segment between two
    /// distinct points. A connector collapsed to a single point is not.
    #[must_use]
    pub fn is_straight_vertical(&self) -> bool {
        self.points.len() == 2 && self.points[0].x == self.points[1].x
    }
}

/// Commit message placed to the right of its point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    pub commit: CommitId,
    pub x: i64,
    pub y: i64,
    pub text: String,
}

/// Complete output of one layout pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Drawing {
    pub width: i64,
    pub height: i64,
    pub lines: Vec<Polyline>,
    pub points: Vec<Rect>,
    pub labels: Vec<Label>,
}

/// Connector color for a lane series.
#[must_use]
pub fn series_color(series: u32) -> &'static str {
    PALETTE[series as usize % PALETTE.len()]
}
