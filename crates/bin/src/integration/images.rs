//! Rendered chart storage.

use lisbon_charts::{ChartRenderer, ChartSpec, RenderError, VectorRenderer, to_svg};
use lisbon_output::ReportImage;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// Errors that can occur while storing a chart image.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ImageError {
    /// Rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders charts and exports them as SVG files.
///
/// Without an explicit directory the files go to a temporary directory that
/// is removed when the store is dropped.
#[derive(Debug)]
pub(crate) struct ImageStore {
    dir: PathBuf,
    // Held so the temporary directory lives as long as the store.
    _temp: Option<TempDir>,
    renderer: VectorRenderer,
    count: usize,
}

impl ImageStore {
    /// Store images in a new temporary directory.
    pub(crate) fn temporary() -> Result<Self, ImageError> {
        let temp = tempfile::Builder::new().prefix("lisbon-").tempdir()?;
        Ok(Self {
            dir: temp.path().to_path_buf(),
            _temp: Some(temp),
            renderer: VectorRenderer::default(),
            count: 0,
        })
    }

    /// Store images in `dir`, creating it if needed. Files are kept.
    pub(crate) fn in_dir(dir: &Path) -> Result<Self, ImageError> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            _temp: None,
            renderer: VectorRenderer::default(),
            count: 0,
        })
    }

    /// Directory the images are written to.
    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    /// Render `chart` and write it as `NN_<slug>.svg`.
    pub(crate) fn store(
        &mut self,
        slug: &str,
        chart: ChartSpec,
    ) -> Result<ReportImage, ImageError> {
        let graphic = self.renderer.render(&chart)?;
        self.count += 1;
        let handle = self.dir.join(format!("{:02}_{slug}.svg", self.count));
        std::fs::write(&handle, to_svg(&graphic))?;
        debug!(path = %handle.display(), "Wrote chart image");

        Ok(ReportImage {
            handle,
            title: chart.labels.title.clone(),
            chart,
            graphic,
        })
    }
}
