use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ranking_core::Category;
use ranking_engine::{FetchSettings, DEFAULT_ENDPOINT};
use ranking_logging::rank_info;
use serde::{Deserialize, Serialize};

use super::cli::Cli;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub application_id: String,
    pub affiliate_id: Option<String>,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_bytes: u64,
    pub initial_category: Category,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            application_id: String::new(),
            affiliate_id: None,
            connect_timeout_ms: duration_ms(fetch.connect_timeout),
            request_timeout_ms: duration_ms(fetch.request_timeout),
            max_bytes: fetch.max_bytes,
            initial_category: Category::All,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("missing application id: set `application_id` in the config file, --app-id or RAKUTEN_APP_ID")]
    MissingApplicationId,
    #[error("config value `{0}` must be greater than zero")]
    ZeroValue(&'static str),
}

/// Reads the RON config at `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            rank_info!("No config at {:?}; using defaults", path);
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    rank_info!("Loaded config from {:?}", path);
    Ok(config)
}

impl AppConfig {
    /// Command-line values win over file values.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(app_id) = &cli.app_id {
            self.application_id = app_id.clone();
        }
        if let Some(affiliate_id) = &cli.affiliate_id {
            self.affiliate_id = Some(affiliate_id.clone());
        }
        if let Some(category) = cli.category {
            self.initial_category = category;
        }
    }

    pub fn fetch_settings(&self) -> Result<FetchSettings, ConfigError> {
        let application_id = self.application_id.trim();
        if application_id.is_empty() {
            return Err(ConfigError::MissingApplicationId);
        }
        for (field, value) in [
            ("connect_timeout_ms", self.connect_timeout_ms),
            ("request_timeout_ms", self.request_timeout_ms),
            ("max_bytes", self.max_bytes),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroValue(field));
            }
        }
        Ok(FetchSettings {
            endpoint: self.endpoint.clone(),
            application_id: application_id.to_string(),
            affiliate_id: self
                .affiliate_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(ToOwned::to_owned),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_bytes,
        })
    }

    /// Upper bound for one request, used when waiting for a single load.
    pub fn settle_timeout(&self) -> Duration {
        Duration::from_millis(
            self.connect_timeout_ms
                .saturating_add(self.request_timeout_ms)
                .saturating_add(1_000),
        )
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
