use super::*;

fn node(id: &str, row: u32, column: u32, series: u32, parents: &[&str]) -> CommitNode {
    CommitNode {
        id: id.into(),
        row,
        column,
        series,
        parents: parents.iter().map(|p| (*p).to_string()).collect(),
        message: format!("commit {id}"),
        url: format!("/c/{id}/"),
    }
}

fn graph(nodes: Vec<CommitNode>, next_column: u32) -> CommitGraph {
    let max_row = nodes.iter().map(|n| n.row).max().unwrap_or(0) + 1;
    CommitGraph { nodes: nodes.into_iter().map(|n| (n.id.clone(), n)).collect(), max_row, next_column }
}

fn layout(g: &CommitGraph) -> GraphLayout {
    GraphLayout::compute(g, LayoutConfig::default()).unwrap()
}

fn line<'a>(d: &'a Drawing, from: &str, to: &str) -> &'a Polyline {
    d.lines.iter().find(|l| l.from == from && l.to == to).unwrap()
}

fn pts(raw: &[(i64, i64)]) -> Vec<Point> {
    raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

// =============================================================================
// positions
// =============================================================================

#[test]
fn position_uses_grid_with_base_offset() {
    let g = graph(vec![node("a", 2, 3, 0, &[])], 4);
    let l = layout(&g);
    assert_eq!(l.position(g.get("a").unwrap()), (40, 60));
    assert_eq!(l.drawing().points[0], Rect { x: 40, y: 60, width: 10, height: 10, fill: INK });
}

#[test]
fn surface_height_covers_all_rows() {
    let g = graph(vec![node("a", 0, 0, 0, &[]), node("b", 4, 0, 0, &[])], 1);
    let d = layout(&g).into_drawing();
    assert_eq!(d.height, (i64::from(g.max_row) + 1) * 20);
    assert_eq!(d.width, SURFACE_WIDTH);
}

#[test]
fn root_commit_draws_point_and_label_only() {
    let g = graph(vec![node("root", 0, 0, 0, &[])], 1);
    let d = layout(&g).into_drawing();
    assert!(d.lines.is_empty());
    assert_eq!(d.points.len(), 1);
    assert_eq!(d.labels.len(), 1);
    assert_eq!(d.labels[0].text, "commit root");
}

// =============================================================================
// routing
// =============================================================================

#[test]
fn same_column_is_single_vertical_segment() {
    let g = graph(vec![node("a", 0, 0, 0, &[]), node("b", 1, 0, 0, &["a"])], 1);
    let l = layout(&g);
    let conn = line(l.drawing(), "b", "a");
    assert!(conn.is_straight_vertical());
    assert_eq!(conn.points, pts(&[(15, 45), (15, 25)]));
    assert!(l.occupancy().is_claimed(10, 20));
    assert!(l.occupancy().is_claimed(10, 40));
}

#[test]
fn collapsed_connector_is_not_straight_vertical() {
    let conn = Polyline { from: "b".into(), to: "a".into(), points: pts(&[(15, 25)]), series: 0, stroke: "#a00" };
    assert!(!conn.is_straight_vertical());
}

#[test]
fn parent_left_routes_with_one_jog_and_claims_lane() {
    let g = graph(vec![node("a", 0, 0, 0, &[]), node("b", 1, 1, 1, &["a"])], 2);
    let l = layout(&g);
    let conn = line(l.drawing(), "b", "a");
    assert_eq!(conn.points, pts(&[(25, 45), (25, 20), (15, 25)]));
    assert!(l.occupancy().is_claimed(20, 20));
    assert!(l.occupancy().is_claimed(20, 40));
    assert_eq!(conn.series, 1);
}

#[test]
fn parent_right_uses_parent_lane_and_series() {
    let g = graph(vec![node("a", 0, 0, 0, &["b"]), node("b", 1, 1, 4, &[])], 2);
    let l = layout(&g);
    let conn = line(l.drawing(), "a", "b");
    assert_eq!(conn.points, pts(&[(15, 25), (25, 30), (25, 40)]));
    assert_eq!(conn.series, 4);
    assert_eq!(conn.stroke, "#0aa");
}

#[test]
fn parent_right_reroutes_around_occupied_lane() {
    let g = graph(
        vec![node("a", 0, 0, 0, &["b"]), node("m", 1, 1, 2, &[]), node("b", 2, 1, 3, &[])],
        2,
    );
    let l = layout(&g);
    let conn = line(l.drawing(), "a", "b");
    assert_eq!(conn.points, pts(&[(15, 25), (35, 30), (35, 60), (25, 65)]));
    assert!(l.occupancy().is_claimed(30, 20));
    assert!(l.occupancy().is_claimed(30, 60));
    assert_eq!(conn.series, 3);
}

#[test]
fn overlapping_spans_get_distinct_lanes() {
    let g = graph(
        vec![
            node("a", 0, 0, 0, &["b"]),
            node("x", 1, 1, 1, &["b"]),
            node("y", 2, 1, 2, &["b"]),
            node("b", 3, 0, 0, &[]),
        ],
        2,
    );
    let l = layout(&g);
    let d = l.drawing();

    let x_line = line(d, "x", "b");
    assert_eq!(x_line.points, pts(&[(25, 45), (35, 50), (35, 80), (15, 85)]));

    let y_line = line(d, "y", "b");
    assert_eq!(y_line.points, pts(&[(25, 65), (25, 80), (15, 85)]));

    // Both run down to row 3; the runs share y 60..80 but not x.
    assert_ne!(x_line.points[1].x, y_line.points[0].x);
}

#[test]
fn merge_edge_takes_parent_series() {
    let g = graph(
        vec![
            node("m", 0, 1, 1, &["p1", "p2"]),
            node("p1", 1, 1, 1, &[]),
            node("p2", 2, 0, 0, &[]),
        ],
        2,
    );
    let d = layout(&g).into_drawing();
    let first = line(&d, "m", "p1");
    let merge = line(&d, "m", "p2");
    assert_eq!(first.series, 1);
    assert_eq!(first.stroke, "#0a0");
    assert_eq!(merge.series, 0);
    assert_eq!(merge.stroke, "#a00");
}

#[test]
fn first_parent_to_left_keeps_child_series() {
    let g = graph(vec![node("a", 0, 0, 0, &[]), node("b", 1, 1, 7, &["a"])], 2);
    let d = layout(&g).into_drawing();
    assert_eq!(line(&d, "b", "a").series, 7);
    assert_eq!(line(&d, "b", "a").stroke, series_color(7));
}

#[test]
fn missing_parent_is_reported() {
    let g = graph(vec![node("a", 0, 0, 0, &["ghost"])], 1);
    let err = GraphLayout::compute(&g, LayoutConfig::default()).unwrap_err();
    assert_eq!(err, LayoutError::MissingParent { commit: "a".into(), parent: "ghost".into() });
    assert!(err.to_string().contains("ghost"));
}

// =============================================================================
// labels
// =============================================================================

#[test]
fn label_clears_own_point() {
    let g = graph(vec![node("a", 0, 0, 0, &[])], 1);
    let d = layout(&g).into_drawing();
    assert_eq!(d.labels[0].x, 30);
    assert_eq!(d.labels[0].y, 20);
}

#[test]
fn label_moves_past_lanes_on_its_row() {
    let g = graph(
        vec![
            node("a", 0, 0, 0, &["b"]),
            node("x", 1, 1, 1, &["b"]),
            node("y", 2, 1, 2, &["b"]),
            node("b", 3, 0, 0, &[]),
        ],
        2,
    );
    let d = layout(&g).into_drawing();
    let x_label = d.labels.iter().find(|l| l.commit == "x").unwrap();
    // Lane 30 claims row y=40, so the label starts two columns past it.
    assert_eq!(x_label.x, 50);
}

#[test]
fn graph_without_counts_sizes_surface_and_clears_labels() {
    let g = CommitGraph::from_json(
        r#"{"tree": {
            "x": {"row": 0, "column": 1, "parents": ["z"], "message": "x"},
            "m": {"row": 1, "column": 0, "message": "m"},
            "z": {"row": 2, "column": 1, "message": "z"}
        }}"#,
    )
    .unwrap();
    let d = layout(&g).into_drawing();
    assert_eq!(d.height, 80);
    assert!(d.points.iter().all(|p| p.y + p.height <= d.height));
    // The x to z connector runs at x=20 through m's row.
    let m_label = d.labels.iter().find(|l| l.commit == "m").unwrap();
    assert_eq!(m_label.x, 40);
}

// =============================================================================
// palette and row lookup
// =============================================================================

#[test]
fn series_color_wraps_every_six() {
    assert_eq!(series_color(0), "#a00");
    assert_eq!(series_color(5), "#f0f");
    assert_eq!(series_color(6), "#a00");
    assert_eq!(series_color(13), "#0a0");
}

#[test]
fn row_at_maps_surface_y_to_commit() {
    let g = graph(vec![node("a", 0, 0, 0, &[]), node("b", 1, 0, 0, &["a"])], 1);
    let l = layout(&g);
    assert_eq!(l.row_at(20).unwrap().commit, "a");
    assert_eq!(l.row_at(39).unwrap().commit, "a");
    assert_eq!(l.row_at(45).unwrap().url, "/c/b/");
    assert!(l.row_at(5).is_none());
    assert!(l.row_at(-3).is_none());
    assert!(l.row_at(400).is_none());
}

#[test]
fn highlight_band_spans_surface() {
    let g = graph(vec![node("a", 0, 0, 0, &[]), node("b", 1, 0, 0, &["a"])], 1);
    let l = layout(&g);
    let band = l.highlight(1).unwrap();
    assert_eq!(band, Rect { x: 0, y: 35, width: SURFACE_WIDTH, height: 20, fill: HIGHLIGHT });
    assert!(l.highlight(9).is_none());
}
