//! Minimal PDF 1.4 writer.
//!
//! Text uses the standard Helvetica fonts with WinAnsi encoding, so no font
//! data is embedded. Charts are drawn as vector paths scaled into their image
//! slot. Output is uncompressed and deterministic.

use crate::document::{Align, Document, Element, ReportImage, TextStyle};
use crate::writer::WriteError;
use lisbon_charts::{Color, Graphic, Shape, TextAnchor};
use std::fmt::Write as _;
use std::io::Write;

const PT_PER_MM: f64 = 72.0 / 25.4;
// Horizontal padding fpdf-style cells apply to left-aligned text, in mm.
const CELL_MARGIN: f64 = 1.0;

const PDF_HEADER: &[u8] = b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n";

const REGULAR: &str = "F1";
const BOLD: &str = "F2";

/// Write `document` as a PDF file.
pub(crate) fn write_pdf(document: &Document, out: &mut dyn Write) -> Result<(), WriteError> {
    let page_width = document.page_size.width * PT_PER_MM;
    let page_height = document.page_size.height * PT_PER_MM;

    let mut pdf = PdfBuilder::default();
    pdf.object(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());

    let page_ids: Vec<usize> = (0..document.pages.len()).map(|i| 6 + 2 * i).collect();
    let kids = page_ids
        .iter()
        .map(|id| format!("{id} 0 R"))
        .collect::<Vec<_>>()
        .join(" ");
    pdf.object(format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", page_ids.len()).into_bytes());
    pdf.object(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    );
    pdf.object(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    );

    let mut info = b"<< /Producer (lisbon) /Title (".to_vec();
    info.extend(pdf_string(&document.title));
    info.extend(b") >>");
    pdf.object(info);

    for (page, &id) in document.pages.iter().zip(&page_ids) {
        let mut canvas = Canvas::new(page_height);
        for element in &page.elements {
            match element {
                Element::Text {
                    text,
                    x,
                    y,
                    w,
                    h,
                    style,
                    align,
                } => canvas.cell(text, *x, *y, *w, *h, *style, *align),
                Element::Image { image, x, y, w, h } => {
                    let ReportImage { graphic, .. } = document
                        .images
                        .get(*image)
                        .ok_or(WriteError::MissingImage(*image))?;
                    canvas.graphic(graphic, *x, *y, *w, *h);
                }
            }
        }

        pdf.object(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {page_width:.2} {page_height:.2}] \
                 /Resources << /Font << /{REGULAR} 3 0 R /{BOLD} 4 0 R >> >> /Contents {} 0 R >>",
                id + 1
            )
            .into_bytes(),
        );
        pdf.stream(canvas.into_bytes());
    }

    out.write_all(&pdf.finish())?;
    Ok(())
}

/// Accumulates numbered objects and writes the cross-reference table.
#[derive(Debug, Default)]
struct PdfBuilder {
    body: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfBuilder {
    fn begin(&mut self) -> usize {
        if self.body.is_empty() {
            self.body.extend(PDF_HEADER);
        }
        self.offsets.push(self.body.len());
        let id = self.offsets.len();
        self.body.extend(format!("{id} 0 obj\n").into_bytes());
        id
    }

    fn object(&mut self, content: Vec<u8>) -> usize {
        let id = self.begin();
        self.body.extend(content);
        self.body.extend(b"\nendobj\n");
        id
    }

    fn stream(&mut self, data: Vec<u8>) -> usize {
        let id = self.begin();
        self.body
            .extend(format!("<< /Length {} >>\nstream\n", data.len()).into_bytes());
        self.body.extend(data);
        self.body.extend(b"\nendstream\nendobj\n");
        id
    }

    fn finish(mut self) -> Vec<u8> {
        let xref = self.body.len();
        let count = self.offsets.len() + 1;
        let mut table = format!("xref\n0 {count}\n0000000000 65535 f \n");
        for offset in &self.offsets {
            let _ = writeln!(table, "{offset:010} 00000 n ");
        }
        let _ = write!(
            table,
            "trailer\n<< /Size {count} /Root 1 0 R /Info 5 0 R >>\nstartxref\n{xref}\n%%EOF\n"
        );
        self.body.extend(table.into_bytes());
        self.body
    }
}

/// Content stream of one page, in points with the origin bottom-left.
#[derive(Debug)]
struct Canvas {
    page_height: f64,
    ops: Vec<u8>,
}

impl Canvas {
    const fn new(page_height: f64) -> Self {
        Self {
            page_height,
            ops: Vec::new(),
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        self.ops
    }

    fn op(&mut self, op: &str) {
        self.ops.extend(op.as_bytes());
        self.ops.push(b'\n');
    }

    /// Convert a top-left millimetre position to PDF points.
    const fn point(&self, x_mm: f64, y_mm: f64) -> (f64, f64) {
        (x_mm * PT_PER_MM, self.page_height - y_mm * PT_PER_MM)
    }

    fn text_at(&mut self, text: &str, x: f64, y: f64, size: f64, bold: bool, fill: Color) {
        let font = if bold { BOLD } else { REGULAR };
        let (r, g, b) = fill.unit_rgb();
        self.op(&format!(
            "BT /{font} {size:.2} Tf {r:.3} {g:.3} {b:.3} rg {x:.2} {y:.2} Td"
        ));
        self.ops.push(b'(');
        self.ops.extend(pdf_string(text));
        self.op(") Tj ET");
    }

    #[allow(clippy::too_many_arguments)]
    fn cell(&mut self, text: &str, x: f64, y: f64, w: f64, h: f64, style: TextStyle, align: Align) {
        let font_mm = style.size / PT_PER_MM;
        let text_mm = text_width(text, style.bold) * style.size / 1000.0 / PT_PER_MM;
        let dx = match align {
            Align::Left => CELL_MARGIN,
            Align::Center => (w - text_mm) / 2.0,
        };
        let (px, py) = self.point(x + dx, y + 0.5 * h + 0.3 * font_mm);
        self.text_at(text, px, py, style.size, style.bold, Color::rgb(0, 0, 0));
    }

    fn graphic(&mut self, graphic: &Graphic, x: f64, y: f64, w: f64, h: f64) {
        if graphic.width <= 0.0 || graphic.height <= 0.0 {
            return;
        }
        let scale = (w / graphic.width).min(h / graphic.height);
        let left = x + (w - graphic.width * scale) / 2.0;
        let top = y + (h - graphic.height * scale) / 2.0;
        let map = |canvas: &Self, (gx, gy): (f64, f64)| {
            canvas.point(left + gx * scale, top + gy * scale)
        };
        let pt_scale = scale * PT_PER_MM;

        for shape in &graphic.shapes {
            match shape {
                Shape::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                } => {
                    let (px, py) = map(self, (*x, *y + *height));
                    let (r, g, b) = fill.unit_rgb();
                    self.op(&format!(
                        "{r:.3} {g:.3} {b:.3} rg {px:.2} {py:.2} {:.2} {:.2} re f",
                        width * pt_scale,
                        height * pt_scale
                    ));
                }
                Shape::Polygon {
                    points,
                    fill,
                    stroke,
                } => {
                    let Some((first, rest)) = points.split_first() else {
                        continue;
                    };
                    let (r, g, b) = fill.unit_rgb();
                    let mut path = format!("{r:.3} {g:.3} {b:.3} rg");
                    if let Some(stroke) = stroke {
                        let (r, g, b) = stroke.unit_rgb();
                        let _ = write!(path, " {r:.3} {g:.3} {b:.3} RG {:.2} w", 0.5 * pt_scale);
                    }
                    let (px, py) = map(self, *first);
                    let _ = write!(path, " {px:.2} {py:.2} m");
                    for point in rest {
                        let (px, py) = map(self, *point);
                        let _ = write!(path, " {px:.2} {py:.2} l");
                    }
                    path.push_str(if stroke.is_some() { " h B" } else { " h f" });
                    self.op(&path);
                }
                Shape::Line {
                    from,
                    to,
                    stroke,
                    width,
                } => {
                    let (x1, y1) = map(self, *from);
                    let (x2, y2) = map(self, *to);
                    let (r, g, b) = stroke.unit_rgb();
                    self.op(&format!(
                        "{r:.3} {g:.3} {b:.3} RG {:.2} w {x1:.2} {y1:.2} m {x2:.2} {y2:.2} l S",
                        width * pt_scale
                    ));
                }
                Shape::Text {
                    x,
                    y,
                    content,
                    size,
                    anchor,
                    bold,
                    fill,
                } => {
                    let size = size * pt_scale;
                    let width = text_width(content, *bold) * size / 1000.0;
                    let (px, py) = map(self, (*x, *y));
                    let px = match anchor {
                        TextAnchor::Start => px,
                        TextAnchor::Middle => px - width / 2.0,
                        TextAnchor::End => px - width,
                    };
                    self.text_at(content, px, py, size, *bold, *fill);
                }
            }
        }
    }
}

/// Encode text as the body of a PDF literal string in WinAnsi encoding.
fn pdf_string(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        let byte = win_ansi(c);
        if matches!(byte, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out
}

fn win_ansi(c: char) -> u8 {
    match c {
        '€' => 0x80,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '–' => 0x96,
        '—' => 0x97,
        _ => match u8::try_from(u32::from(c)) {
            Ok(byte) if byte >= 0x20 && !(0x7f..0xa0).contains(&byte) => byte,
            _ => b'?',
        },
    }
}

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width of `text` in thousandths of the font size.
fn text_width(text: &str, bold: bool) -> f64 {
    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
    text.chars()
        .map(|c| {
            let byte = win_ansi(c);
            match byte {
                0x20..=0x7e => f64::from(table[usize::from(byte - 0x20)]),
                // Accented capitals and lowercase letters.
                0xc0..=0xdf => 722.0,
                _ => 556.0,
            }
        })
        .sum()
}
