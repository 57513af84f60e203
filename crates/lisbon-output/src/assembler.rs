//! Report assembly.

use crate::document::{A4, Align, Document, Element, Page, ReportImage, TextStyle};
use crate::summary::SummaryRecord;

const MARGIN: f64 = 10.0;
const TITLE_CELL_WIDTH: f64 = 200.0;
const TITLE_SIZE: f64 = 18.0;
const LINE_HEIGHT: f64 = 10.0;
const SUMMARY_SIZE: f64 = 12.0;
const IMAGE_TOP: f64 = 30.0;
const IMAGE_WIDTH: f64 = 90.0;
const IMAGE_HEIGHT: f64 = 100.0;

/// Left edges of the two image slots on a chart page.
pub const IMAGE_SLOTS: [f64; 2] = [10.0, 105.0];

/// Lay a title, a summary and charts out as a paginated document.
///
/// The first page holds the title and the summary lines; charts follow two
/// per page in input order. `k` charts yield `1 + ceil(k / 2)` pages.
pub fn assemble(images: Vec<ReportImage>, summary: &SummaryRecord, title: &str) -> Document {
    let mut pages = Vec::with_capacity(1 + images.len().div_ceil(2));
    pages.push(title_page(summary, title));

    for first in (0..images.len()).step_by(IMAGE_SLOTS.len()) {
        let elements = (first..images.len())
            .zip(IMAGE_SLOTS)
            .map(|(image, x)| Element::Image {
                image,
                x,
                y: IMAGE_TOP,
                w: IMAGE_WIDTH,
                h: IMAGE_HEIGHT,
            })
            .collect();
        pages.push(Page { elements });
    }

    Document {
        title: title.to_string(),
        page_size: A4,
        pages,
        images,
    }
}

fn title_page(summary: &SummaryRecord, title: &str) -> Page {
    let mut elements = vec![Element::Text {
        text: title.to_string(),
        x: MARGIN,
        y: MARGIN,
        w: TITLE_CELL_WIDTH,
        h: LINE_HEIGHT,
        style: TextStyle::bold(TITLE_SIZE),
        align: Align::Center,
    }];

    // One blank line between the title and the summary.
    let mut y = MARGIN + 2.0 * LINE_HEIGHT;
    for line in summary.lines() {
        elements.push(Element::Text {
            text: line,
            x: MARGIN,
            y,
            w: TITLE_CELL_WIDTH,
            h: LINE_HEIGHT,
            style: TextStyle::regular(SUMMARY_SIZE),
            align: Align::Left,
        });
        y += LINE_HEIGHT;
    }

    Page { elements }
}
