//! Rendering: draws a [`Drawing`] as a standalone SVG document.
//!
//! This module is the only place that knows about the SVG surface. It reads
//! the primitives produced by the layout and emits markup; it never changes
//! layout state. A selected-row band sits at the bottom, then connectors,
//! then commit points, with labels on top.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use super::consts::{INK, LABEL_FONT_PX};
use super::draw::{Drawing, Label, Polyline, Rect};

/// Render the drawing to SVG markup, with an optional row highlight band
/// behind everything else.
#[must_use]
pub fn render_svg(drawing: &Drawing, highlight: Option<&Rect>) -> String {
    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = drawing.width,
        h = drawing.height,
    );
    out.push('\n');

    // Layer 0: selected row.
    if let Some(band) = highlight {
        push_rect(&mut out, band);
    }

    // Layer 1: connectors.
    for line in &drawing.lines {
        push_polyline(&mut out, line);
    }

    // Layer 2: commit points.
    for rect in &drawing.points {
        push_rect(&mut out, rect);
    }

    // Layer 3: labels.
    for label in &drawing.labels {
        push_label(&mut out, label);
    }

    out.push_str("</svg>\n");
    out
}

fn push_polyline(out: &mut String, line: &Polyline) {
    let points = line
        .points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ");
    out.push_str(&format!(
        r#"<polyline points="{points}" fill="none" stroke="{}" stroke-width="1" stroke-linejoin="round" data-from="{}" data-to="{}"/>"#,
        line.stroke,
        escape(&line.from),
        escape(&line.to),
    ));
    out.push('\n');
}

fn push_rect(out: &mut String, rect: &Rect) {
    out.push_str(&format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        rect.x, rect.y, rect.width, rect.height, rect.fill,
    ));
    out.push('\n');
}

fn push_label(out: &mut String, label: &Label) {
    out.push_str(&format!(
        r#"<text x="{}" y="{}" fill="{INK}" font-family="sans-serif" font-size="{LABEL_FONT_PX}px" dominant-baseline="hanging" data-commit="{}">{}</text>"#,
        label.x,
        label.y,
        escape(&label.commit),
        escape(&label.text),
    ));
    out.push('\n');
}

/// Escape text for use in XML content and attribute values.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
