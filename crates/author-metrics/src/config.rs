//! Configuration for the author metrics service.

use std::path::{Path, PathBuf};

use anyhow::Context;

/// Deployment defaults.
pub mod defaults {
    /// Years served by the reference deployment.
    pub const YEARS: &[u16] = &[2020, 2021, 2022, 2023];

    /// Year searched when no dataset is loaded at all.
    pub const LATEST_YEAR: u16 = 2023;

    /// Directory holding the yearly tables.
    pub const DATA_DIR: &str = "data";

    /// File name of one yearly table; `{year}` is substituted.
    pub const FILE_TEMPLATE: &str =
        "Table_1_Authors_singleyr_{year}_pubs_since_1788_wopp_extracted_202408.csv";

    /// Origin of the bundled front end.
    pub const CORS_ORIGIN: &str = "http://localhost:5173";

    /// HTTP port.
    pub const PORT: u16 = 8000;

    /// Maximum suggestions returned with a not-found error.
    pub const SUGGESTION_LIMIT: usize = 3;
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing the yearly tables.
    pub data_dir: PathBuf,

    /// File name template, `{year}` is replaced by the dataset year.
    pub file_template: String,

    /// Years to load, ascending.
    pub years: Vec<u16>,

    /// Origins allowed by CORS.
    pub cors_origins: Vec<String>,

    /// Drop years that fail to load instead of refusing to start.
    pub allow_partial_load: bool,
}

impl Config {
    /// Create a configuration reading tables from `data_dir` with default settings.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            file_template: defaults::FILE_TEMPLATE.to_string(),
            years: defaults::YEARS.to_vec(),
            cors_origins: vec![defaults::CORS_ORIGIN.to_string()],
            allow_partial_load: false,
        }
    }

    /// Create a test configuration with short file names.
    #[must_use]
    pub fn for_testing(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            file_template: "authors_{year}.csv".to_string(),
            years: defaults::YEARS.to_vec(),
            cors_origins: vec![defaults::CORS_ORIGIN.to_string()],
            allow_partial_load: false,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let data_dir =
            std::env::var("AUTHOR_METRICS_DATA_DIR").unwrap_or_else(|_| defaults::DATA_DIR.into());
        let mut config = Self::new(data_dir);

        if let Ok(template) = std::env::var("AUTHOR_METRICS_FILE_TEMPLATE") {
            config.file_template = template;
        }
        if let Ok(years) = std::env::var("AUTHOR_METRICS_YEARS") {
            config.years = parse_years(&years)?;
        }
        if let Ok(origins) = std::env::var("AUTHOR_METRICS_CORS_ORIGINS") {
            config.cors_origins = split_list(&origins);
        }
        if let Ok(flag) = std::env::var("AUTHOR_METRICS_ALLOW_PARTIAL") {
            config.allow_partial_load = matches!(flag.trim(), "1" | "true" | "yes");
        }

        Ok(config)
    }

    /// Path of the table for `year`.
    #[must_use]
    pub fn dataset_path(&self, year: u16) -> PathBuf {
        self.data_dir.join(self.file_template.replace("{year}", &year.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(defaults::DATA_DIR)
    }
}

/// Parse a comma separated year list, sorted and deduplicated.
///
/// # Errors
///
/// Returns error if any entry is not a year.
pub fn parse_years(raw: &str) -> anyhow::Result<Vec<u16>> {
    let mut years = split_list(raw)
        .iter()
        .map(|y| y.parse::<u16>().with_context(|| format!("invalid year '{y}'")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    years.sort_unstable();
    years.dedup();
    anyhow::ensure!(!years.is_empty(), "at least one year must be configured");
    Ok(years)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}
