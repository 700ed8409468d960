use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::loader::LoadOptions;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CATALOG_DASHBOARD_CONFIG";

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "catalog-dashboard.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Settings read from a JSON file. Every key is optional:
///
/// ```json
/// {
///   "dataset_path": "netflix_titles.csv",
///   "strict_dates": false,
///   "placeholder": "Not Specified",
///   "top_genres": 10
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Catalog opened at startup.
    pub dataset_path: Option<PathBuf>,
    /// Fail the load on an unparseable `date_added`.
    pub strict_dates: bool,
    /// Marker for "no data" in director / cast fields.
    pub placeholder: String,
    pub top_genres: usize,
    pub top_countries: usize,
    pub top_people: usize,
    pub trend_genres: usize,
    pub crosstab_directors: usize,
    /// Countries offered by the explorer selector.
    pub explorer_country_options: usize,
    /// Countries preselected in the explorer.
    pub explorer_default_countries: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            dataset_path: None,
            strict_dates: false,
            placeholder: "Not Specified".to_string(),
            top_genres: 10,
            top_countries: 15,
            top_people: 10,
            trend_genres: 5,
            crosstab_directors: 5,
            explorer_country_options: 20,
            explorer_default_countries: 10,
        }
    }
}

impl DashboardConfig {
    /// Resolve the config: `$CATALOG_DASHBOARD_CONFIG`, then
    /// `./catalog-dashboard.json`, then defaults.
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::from_file(local);
        }
        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            strict_dates: self.strict_dates,
        }
    }
}
