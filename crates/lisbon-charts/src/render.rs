//! Chart rendering into vector graphics.

use crate::graphic::{Graphic, Shape, TextAnchor};
use crate::palette::Color;
use crate::spec::{ChartKind, ChartSpec};
use std::f64::consts::{PI, TAU};
use thiserror::Error;

// The report places every chart in a 90x100 slot, so the canvas keeps that aspect ratio.
const WIDTH: f64 = 540.0;
const HEIGHT: f64 = 600.0;
const PADDING: f64 = 16.0;
const AXIS_GUTTER: f64 = 48.0;
const TITLE_BAND: f64 = 56.0;
const LEGEND_WIDTH: f64 = 150.0;
const LEGEND_ROW: f64 = 14.0;
const LEGEND_LABEL_CHARS: usize = 24;
const Y_TICKS: usize = 5;

const TEXT_COLOR: Color = Color::rgb(0x33, 0x33, 0x33);
const MUTED_COLOR: Color = Color::rgb(0x66, 0x66, 0x66);
const GRID_COLOR: Color = Color::rgb(0xe5, 0xe5, 0xe5);
const AXIS_COLOR: Color = Color::rgb(0x44, 0x44, 0x44);
const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

/// Errors that can occur while rendering a chart.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The chart has no categories.
    #[error("Chart '{0}' has nothing to draw")]
    Empty(String),

    /// Categories and values differ in length.
    #[error("Chart '{title}' has {categories} categories but {values} values")]
    Mismatched {
        /// Chart title.
        title: String,
        /// Number of categories.
        categories: usize,
        /// Number of values.
        values: usize,
    },
}

/// Turns chart descriptions into vector graphics.
pub trait ChartRenderer {
    /// Render a chart.
    ///
    /// # Errors
    ///
    /// Returns an error if the chart cannot be laid out.
    fn render(&self, spec: &ChartSpec) -> Result<Graphic, RenderError>;
}

/// Renderer laying charts out on a fixed canvas with a legend on the right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorRenderer {
    width: f64,
    height: f64,
}

impl Default for VectorRenderer {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
        }
    }
}

/// Drawing area of a chart, in canvas units.
#[derive(Debug, Clone, Copy)]
struct Area {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Area {
    const fn width(&self) -> f64 {
        self.right - self.left
    }

    const fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

impl VectorRenderer {
    fn plot_area(&self, left_gutter: f64, bottom_gutter: f64) -> Area {
        Area {
            left: PADDING + left_gutter,
            top: TITLE_BAND,
            right: self.width - LEGEND_WIDTH - PADDING,
            bottom: self.height - PADDING - bottom_gutter,
        }
    }

    fn draw_title(&self, graphic: &mut Graphic, spec: &ChartSpec) {
        if !spec.labels.title.is_empty() {
            graphic.text(
                self.width / 2.0,
                PADDING + 16.0,
                spec.labels.title.as_str(),
                16.0,
                TextAnchor::Middle,
                true,
                TEXT_COLOR,
            );
        }
    }

    fn draw_legend(&self, graphic: &mut Graphic, spec: &ChartSpec) {
        let x = self.width - LEGEND_WIDTH;
        let rows = ((self.height - TITLE_BAND - PADDING) / LEGEND_ROW).floor() as usize;
        let overflow = spec.color_map.len() > rows;
        let shown = if overflow {
            rows.saturating_sub(1)
        } else {
            spec.color_map.len()
        };

        let mut y = TITLE_BAND;
        for (name, color) in spec.color_map.iter().take(shown) {
            graphic.push(Shape::Rect {
                x,
                y,
                width: 10.0,
                height: 10.0,
                fill: *color,
            });
            graphic.text(
                x + 14.0,
                y + 9.0,
                truncate(name, LEGEND_LABEL_CHARS),
                9.0,
                TextAnchor::Start,
                false,
                TEXT_COLOR,
            );
            y += LEGEND_ROW;
        }

        if overflow {
            let hidden = spec.color_map.len() - shown;
            graphic.text(
                x,
                y + 9.0,
                format!("+{hidden}"),
                9.0,
                TextAnchor::Start,
                false,
                MUTED_COLOR,
            );
        }
    }

    fn render_bar(&self, spec: &ChartSpec) -> Graphic {
        let mut graphic = Graphic::new(self.width, self.height);
        self.draw_title(&mut graphic, spec);

        let area = self.plot_area(AXIS_GUTTER, 24.0);
        let (min_v, max_v) = spec
            .y_range
            .filter(|(lo, hi)| hi > lo)
            .unwrap_or_else(|| flat_range(&spec.values));
        let scale = |v: f64| area.top + (max_v - v) / (max_v - min_v) * area.height();

        for i in 0..Y_TICKS {
            let v = min_v + (max_v - min_v) * i as f64 / (Y_TICKS - 1) as f64;
            let y = scale(v);
            graphic.push(Shape::Line {
                from: (area.left, y),
                to: (area.right, y),
                stroke: GRID_COLOR,
                width: 0.5,
            });
            graphic.text(
                area.left - 6.0,
                y + 3.0,
                format!("{v:.1}"),
                9.0,
                TextAnchor::End,
                false,
                MUTED_COLOR,
            );
        }

        let baseline = scale(0.0_f64.clamp(min_v, max_v));
        let slot = area.width() / spec.len() as f64;
        let bar_width = slot * 0.7;

        for (i, (category, value)) in spec.categories.iter().zip(&spec.values).enumerate() {
            if !value.is_finite() {
                continue;
            }
            let top = scale(value.clamp(min_v, max_v));
            let x = area.left + slot * i as f64 + (slot - bar_width) / 2.0;
            graphic.push(Shape::Rect {
                x,
                y: top.min(baseline),
                width: bar_width,
                height: (top - baseline).abs(),
                fill: spec.color_of(category).unwrap_or(MUTED_COLOR),
            });

            let label_y = if *value >= 0.0 { top - 4.0 } else { top + 11.0 };
            graphic.text(
                x + bar_width / 2.0,
                label_y,
                spec.value_labels.get(i).cloned().unwrap_or_default(),
                9.0,
                TextAnchor::Middle,
                false,
                TEXT_COLOR,
            );
        }

        if min_v < 0.0 && max_v > 0.0 {
            graphic.push(Shape::Line {
                from: (area.left, baseline),
                to: (area.right, baseline),
                stroke: AXIS_COLOR,
                width: 1.0,
            });
        }
        graphic.push(Shape::Line {
            from: (area.left, area.top),
            to: (area.left, area.bottom),
            stroke: AXIS_COLOR,
            width: 1.0,
        });

        if !spec.labels.y_label.is_empty() {
            graphic.text(
                PADDING,
                area.top - 10.0,
                spec.labels.y_label.as_str(),
                10.0,
                TextAnchor::Start,
                false,
                MUTED_COLOR,
            );
        }
        if !spec.labels.x_label.is_empty() {
            graphic.text(
                area.left + area.width() / 2.0,
                area.bottom + 18.0,
                spec.labels.x_label.as_str(),
                10.0,
                TextAnchor::Middle,
                false,
                MUTED_COLOR,
            );
        }
        if spec.show_x_tick_labels {
            for (i, category) in spec.categories.iter().enumerate() {
                graphic.text(
                    area.left + slot * (i as f64 + 0.5),
                    area.bottom + 10.0,
                    truncate(category, 12),
                    8.0,
                    TextAnchor::Middle,
                    false,
                    MUTED_COLOR,
                );
            }
        }

        self.draw_legend(&mut graphic, spec);
        graphic
    }

    fn render_pie(&self, spec: &ChartSpec) -> Graphic {
        let mut graphic = Graphic::new(self.width, self.height);
        self.draw_title(&mut graphic, spec);

        let area = self.plot_area(0.0, 0.0);
        let radius = area.width().min(area.height()) / 2.0 - PADDING;
        let center = (
            area.left + area.width() / 2.0,
            area.top + area.height() / 2.0,
        );
        let total: f64 = spec.values.iter().filter(|v| v.is_finite()).sum();

        // Slices run clockwise from twelve o'clock.
        let mut start = 0.0;
        for (i, (category, value)) in spec.categories.iter().zip(&spec.values).enumerate() {
            if !value.is_finite() || *value <= 0.0 || total <= 0.0 {
                continue;
            }
            let sweep = value / total * TAU;
            let fill = spec.color_of(category).unwrap_or(MUTED_COLOR);
            graphic.push(Shape::Polygon {
                points: wedge(center, radius, start, sweep),
                fill,
                stroke: Some(WHITE),
            });

            if sweep >= TAU * 0.03 {
                let mid = start + sweep / 2.0;
                let (x, y) = polar(center, radius * 0.65, mid);
                graphic.text(
                    x,
                    y + 3.0,
                    spec.value_labels.get(i).cloned().unwrap_or_default(),
                    9.0,
                    TextAnchor::Middle,
                    false,
                    label_color(fill),
                );
            }
            start += sweep;
        }

        self.draw_legend(&mut graphic, spec);
        graphic
    }
}

impl ChartRenderer for VectorRenderer {
    fn render(&self, spec: &ChartSpec) -> Result<Graphic, RenderError> {
        if spec.is_empty() {
            return Err(RenderError::Empty(spec.labels.title.clone()));
        }
        if spec.categories.len() != spec.values.len() {
            return Err(RenderError::Mismatched {
                title: spec.labels.title.clone(),
                categories: spec.categories.len(),
                values: spec.values.len(),
            });
        }

        Ok(match spec.kind {
            ChartKind::Bar => self.render_bar(spec),
            ChartKind::Pie => self.render_pie(spec),
        })
    }
}

fn flat_range(values: &[f64]) -> (f64, f64) {
    let v = values.iter().copied().find(|v| v.is_finite()).unwrap_or(0.0);
    // Widen flat ranges so the scale stays finite.
    let adjust = if v == 0.0 { 1.0 } else { v.abs() * 0.1 };
    (v - adjust, v + adjust)
}

fn polar(center: (f64, f64), radius: f64, angle: f64) -> (f64, f64) {
    (
        center.0 + radius * angle.sin(),
        center.1 - radius * angle.cos(),
    )
}

fn wedge(center: (f64, f64), radius: f64, start: f64, sweep: f64) -> Vec<(f64, f64)> {
    let steps = ((sweep / (PI / 90.0)).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    if sweep < TAU - 1e-9 {
        points.push(center);
    }
    for step in 0..=steps {
        points.push(polar(center, radius, start + sweep * step as f64 / steps as f64));
    }
    points
}

fn label_color(fill: Color) -> Color {
    let (r, g, b) = fill.unit_rgb();
    if 0.299 * r + 0.587 * g + 0.114 * b < 0.55 {
        WHITE
    } else {
        TEXT_COLOR
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
