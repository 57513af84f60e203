//! Vector graphics produced by chart renderers.
//!
//! Coordinates are canvas units with the origin at the top-left corner and y
//! growing downwards, the SVG convention. Consumers that place a graphic on a
//! page scale it to their own units.

use crate::palette::Color;

/// Horizontal anchoring of a text shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor point.
    Start,
    /// Text is centered on the anchor point.
    Middle,
    /// Text ends at the anchor point.
    End,
}

impl TextAnchor {
    /// SVG `text-anchor` value.
    pub const fn as_svg(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// A single drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Filled axis-aligned rectangle.
    Rect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Fill color.
        fill: Color,
    },
    /// Filled closed polygon.
    Polygon {
        /// Vertices in drawing order.
        points: Vec<(f64, f64)>,
        /// Fill color.
        fill: Color,
        /// Optional outline color.
        stroke: Option<Color>,
    },
    /// Straight line segment.
    Line {
        /// Start point.
        from: (f64, f64),
        /// End point.
        to: (f64, f64),
        /// Stroke color.
        stroke: Color,
        /// Stroke width.
        width: f64,
    },
    /// Single line of text; `y` is the baseline.
    Text {
        /// Anchor x.
        x: f64,
        /// Baseline y.
        y: f64,
        /// Text content.
        content: String,
        /// Font size.
        size: f64,
        /// Horizontal anchoring.
        anchor: TextAnchor,
        /// Bold weight.
        bold: bool,
        /// Text color.
        fill: Color,
    },
}

/// A rendered chart: a canvas size and the shapes drawn on it, back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct Graphic {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Shapes in painting order.
    pub shapes: Vec<Shape>,
}

impl Graphic {
    /// Create an empty canvas.
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    /// Append a shape.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Append a text shape.
    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &mut self,
        x: f64,
        y: f64,
        content: impl Into<String>,
        size: f64,
        anchor: TextAnchor,
        bold: bool,
        fill: Color,
    ) {
        self.push(Shape::Text {
            x,
            y,
            content: content.into(),
            size,
            anchor,
            bold,
            fill,
        });
    }

    /// Texts drawn on the canvas, in painting order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }
}
