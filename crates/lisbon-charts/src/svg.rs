//! SVG export of rendered charts.

use crate::graphic::{Graphic, Shape};
use std::fmt::Write;

/// Serialize a graphic as a standalone SVG document.
pub fn to_svg(graphic: &Graphic) -> String {
    let mut svg = svg_header(graphic.width, graphic.height);

    for shape in &graphic.shapes {
        // Writing into a String cannot fail.
        let _ = match shape {
            Shape::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => write!(
                svg,
                r#"<rect x="{x:.2}" y="{y:.2}" width="{width:.2}" height="{height:.2}" fill="{fill}" />"#
            ),
            Shape::Polygon {
                points,
                fill,
                stroke,
            } => {
                let points = points
                    .iter()
                    .map(|(x, y)| format!("{x:.2},{y:.2}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                let stroke = stroke.map_or_else(|| "none".to_string(), |c| c.to_string());
                write!(
                    svg,
                    r#"<polygon points="{points}" fill="{fill}" stroke="{stroke}" stroke-width="1" />"#
                )
            }
            Shape::Line {
                from,
                to,
                stroke,
                width,
            } => write!(
                svg,
                r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{stroke}" stroke-width="{width}" />"#,
                x1 = from.0,
                y1 = from.1,
                x2 = to.0,
                y2 = to.1,
            ),
            Shape::Text {
                x,
                y,
                content,
                size,
                anchor,
                bold,
                fill,
            } => write!(
                svg,
                r#"<text x="{x:.2}" y="{y:.2}" font-size="{size}" font-weight="{weight}" text-anchor="{anchor}" fill="{fill}">{content}</text>"#,
                weight = if *bold { "bold" } else { "normal" },
                anchor = anchor.as_svg(),
                content = escape(content),
            ),
        };
    }

    svg.push_str(svg_footer());
    svg
}

fn svg_header(width: f64, height: f64) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><style>text{{font-family:Helvetica,Arial,sans-serif}}</style><rect width="100%" height="100%" fill="white" />"#,
        w = width,
        h = height
    )
}

const fn svg_footer() -> &'static str {
    "</svg>"
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
