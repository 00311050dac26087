use super::*;
use crate::graph::consts::HIGHLIGHT;
use crate::graph::draw::Point;

fn sample() -> Drawing {
    Drawing {
        width: 750,
        height: 60,
        lines: vec![Polyline {
            from: "b".into(),
            to: "a".into(),
            points: vec![Point::new(15, 45), Point::new(15, 25)],
            series: 0,
            stroke: "#a00",
        }],
        points: vec![Rect { x: 10, y: 20, width: 10, height: 10, fill: INK }],
        labels: vec![Label { commit: "a".into(), x: 30, y: 20, text: "Fix <b> & \"quotes\"".into() }],
    }
}

#[test]
fn document_has_surface_size() {
    let svg = render_svg(&sample(), None);
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(r#"width="750" height="60""#));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn polyline_lists_points_and_stroke() {
    let svg = render_svg(&sample(), None);
    assert!(svg.contains(r#"points="15,45 15,25""#));
    assert!(svg.contains(r##"stroke="#a00""##));
    assert!(svg.contains(r#"data-from="b" data-to="a""#));
}

#[test]
fn labels_are_escaped() {
    let svg = render_svg(&sample(), None);
    assert!(svg.contains("Fix &lt;b&gt; &amp; &quot;quotes&quot;"));
    assert!(!svg.contains("<b>"));
}

#[test]
fn layers_draw_lines_before_points_before_labels() {
    let svg = render_svg(&sample(), None);
    let line_at = svg.find("<polyline").unwrap();
    let rect_at = svg.find("<rect").unwrap();
    let text_at = svg.find("<text").unwrap();
    assert!(line_at < rect_at);
    assert!(rect_at < text_at);
}

#[test]
fn empty_drawing_is_valid_document() {
    let svg = render_svg(&Drawing::default(), None);
    assert!(!svg.contains("<rect"));
    assert!(svg.contains("</svg>"));
}

#[test]
fn highlight_band_is_drawn_first() {
    let band = Rect { x: 0, y: 35, width: 750, height: 20, fill: HIGHLIGHT };
    let svg = render_svg(&sample(), Some(&band));
    let band_at = svg.find(r##"<rect x="0" y="35" width="750" height="20" fill="#ccc"/>"##).unwrap();
    assert!(band_at < svg.find("<polyline").unwrap());
}
