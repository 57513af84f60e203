//! Integration tests from rendered charts to written documents.

use lisbon_charts::{
    ChartLabels, ChartRenderer, VectorRenderer, build_bar, build_pie, format_percent,
};
use lisbon_output::{
    DocumentWriter, ExportFormat, PdfWriter, ReportImage, SummaryRecord, assemble,
    render_document,
};
use std::path::PathBuf;
use tempfile::TempDir;

fn chart_images() -> Vec<ReportImage> {
    let renderer = VectorRenderer::default();
    let charts = [
        build_bar(
            ChartLabels::titled("Portfolio"),
            vec!["Month".into(), "Quarter".into()],
            vec![1.2, -0.4],
            format_percent,
        ),
        build_pie(
            ChartLabels::titled("By class"),
            vec!["Equity".into(), "Bonds".into()],
            vec![70.0, 30.0],
        ),
        build_bar(
            ChartLabels::titled("By asset"),
            vec!["Alpha".into(), "Beta".into(), "Gamma".into()],
            vec![50.0, 30.0, 20.0],
            format_percent,
        ),
    ];

    charts
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(i, chart)| ReportImage {
            handle: PathBuf::from(format!("chart_{i}.svg")),
            title: chart.labels.title.clone(),
            graphic: renderer.render(&chart).unwrap(),
            chart,
        })
        .collect()
}

fn summary() -> SummaryRecord {
    SummaryRecord::new()
        .with("Número da Apólice", "1001")
        .with("Mês de Avaliação", "Outubro")
}

#[test]
fn test_pdf_has_one_page_per_chart_pair() {
    let document = assemble(chart_images(), &summary(), "Estratégia Internacional - Outubro");
    assert_eq!(document.page_count(), 3);

    let mut bytes = Vec::new();
    PdfWriter.write_to(&document, &mut bytes).unwrap();
    let pages = bytes
        .windows(b"/Type /Page ".len())
        .filter(|w| *w == b"/Type /Page ")
        .count();
    assert_eq!(pages, 3);
    // Latin-1 text is written in WinAnsi encoding.
    assert!(bytes.windows(9).any(|w| w == b"Estrat\xe9gi"));
}

#[test]
fn test_render_document_to_files() {
    let dir = TempDir::new().unwrap();
    let document = assemble(chart_images(), &summary(), "Report");

    let pdf = dir.path().join("report.pdf");
    render_document(&document, ExportFormat::Pdf, &pdf).unwrap();
    assert!(std::fs::read(&pdf).unwrap().starts_with(b"%PDF-1.4"));

    let json = dir.path().join("report.json");
    render_document(&document, ExportFormat::Json, &json).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(value["pages"].as_array().unwrap().len(), 3);
    assert_eq!(value["pages"][2]["elements"][0]["type"], "image");
    assert_eq!(value["images"][2]["handle"], "chart_2.svg");
}

#[test]
fn test_json_is_byte_identical_for_identical_inputs() {
    let first = assemble(chart_images(), &summary(), "Report").to_json().unwrap();
    let second = assemble(chart_images(), &summary(), "Report").to_json().unwrap();
    assert_eq!(first, second);
}
