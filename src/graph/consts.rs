//! Shared numeric constants for the graph layout.

// ── Grid ────────────────────────────────────────────────────────

/// Horizontal distance between adjacent columns, in pixels.
pub const X_SPACE: i64 = 10;

/// Vertical distance between adjacent rows, in pixels.
pub const Y_SPACE: i64 = 20;

/// Offset from a point's top-left corner to its center.
pub const POINT_OFFSET: i64 = 5;

/// Side length of the square drawn for each commit.
pub const POINT_SIZE: i64 = 10;

/// Default drawing surface width; matches the row highlighter width.
pub const SURFACE_WIDTH: i64 = 750;

// ── Color ───────────────────────────────────────────────────────

/// Connector palette, indexed by `series % 6`.
pub const PALETTE: [&str; 6] = ["#a00", "#0a0", "#00a", "#aa0", "#0aa", "#f0f"];

/// Fill color for commit points and label text.
pub const INK: &str = "#000";

/// Fill color for the selected-row highlight band.
pub const HIGHLIGHT: &str = "#ccc";

/// Label font size in pixels; labels hang from the top of their row.
pub const LABEL_FONT_PX: i64 = 12;
