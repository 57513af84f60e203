//! Report configuration.
//!
//! Settings are read from a TOML file. Every key is optional:
//!
//! ```toml
//! title = "Estratégia Internacional"
//! locale = "pt"
//! top_n = 5
//! format = "pdf"
//!
//! [columns]
//! entity_id = "Asset"
//! ```

use lisbon::Locale;
use lisbon_data::ColumnNames;
use lisbon_output::ExportFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Default report title, followed by the evaluation month.
pub(crate) const DEFAULT_TITLE: &str = "Estratégia Internacional";

/// Default number of assets in the best and worst performer charts.
pub(crate) const DEFAULT_TOP_N: usize = 5;

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The configuration file could not be read.
    #[error("Cannot read config {path}: {source}")]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`ReportConfig`].
    #[error("Invalid config {path}: {source}")]
    Parse {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },
}

/// Settings of a report run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ReportConfig {
    /// Report title, followed by the evaluation month.
    pub title: String,
    /// Report language.
    pub locale: Locale,
    /// Number of assets in the best and worst performer charts.
    pub top_n: usize,
    /// Output format.
    pub format: ExportFormat,
    /// Column headers of the sheets.
    pub columns: ColumnNames,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            locale: Locale::default(),
            top_n: DEFAULT_TOP_N,
            format: ExportFormat::default(),
            columns: ColumnNames::default(),
        }
    }
}

/// Get the default configuration file path.
pub(crate) fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lisbon").join("config.toml"))
}

impl ReportConfig {
    /// Parse a configuration from TOML text.
    pub(crate) fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used when
    /// it exists and built-in defaults otherwise.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => path,
                None => {
                    debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        debug!(path = %path.display(), "Loading config");
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&text, &path)
    }
}
