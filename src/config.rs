use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// File picked up from the working directory when present.
pub const CONFIG_FILE_NAME: &str = "names-dashboard.json";

pub const DEFAULT_SOURCE_URL: &str = "https://www.ssa.gov/oact/babynames/names.zip";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Tunables of the dashboard. Every field has a default, so a config file
/// only needs the keys it wants to change:
///
/// ```json
/// { "max_year": 2024, "detail_limit": 250 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Where the names archive is downloaded from.
    pub source_url: String,
    /// User-Agent sent with the download request.
    pub user_agent: String,
    /// Lower bound of the year slider.
    pub min_year: u16,
    /// Upper bound of the year slider.
    pub max_year: u16,
    /// Year selected at startup.
    pub default_year: u16,
    /// Entries of the top-N selector.
    pub top_n_choices: Vec<usize>,
    /// Maximum rows in the detail table.
    pub detail_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            user_agent: concat!("names-dashboard/", env!("CARGO_PKG_VERSION")).to_string(),
            min_year: 1880,
            max_year: 2023,
            default_year: 2000,
            top_n_choices: vec![5, 10, 15, 20],
            detail_limit: 100,
        }
    }
}

impl DashboardConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validated()
    }

    /// Use `names-dashboard.json` from the working directory if there is one,
    /// defaults otherwise. A broken file is reported and ignored.
    pub fn discover() -> Self {
        let path = Path::new(CONFIG_FILE_NAME);
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Using configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    fn validated(mut self) -> Result<Self> {
        if self.min_year > self.max_year {
            bail!(
                "min_year {} is after max_year {}",
                self.min_year,
                self.max_year
            );
        }
        if self.top_n_choices.is_empty() {
            bail!("top_n_choices must not be empty");
        }
        if self.top_n_choices.contains(&0) {
            bail!("top_n_choices must be positive");
        }
        self.default_year = self.default_year.clamp(self.min_year, self.max_year);
        Ok(self)
    }

    /// First top-N choice, used at startup.
    pub fn default_top_n(&self) -> usize {
        self.top_n_choices.first().copied().unwrap_or(5)
    }
}
