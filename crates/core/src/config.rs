//! Application configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `IGDB_FETCH_*` environment variables. Credentials are never read from
//! here; they are supplied on the command line.

use std::{
    fs,
    path::{Path, PathBuf},
};

use ::config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Directory under the user's config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "igdb-fetch";
/// Default metadata service endpoint.
pub const DEFAULT_API_URL: &str = "https://api.igdb.com/v4";
/// Default image host.
pub const DEFAULT_IMAGE_URL: &str = "https://images.igdb.com/igdb/image/upload";
/// Largest image size the service offers.
pub const DEFAULT_IMAGE_SIZE: &str = "1080p";
/// Service-side default for search results.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

const DEFAULT_CONFIG: &str = r#"# igdb-fetch configuration
#
# Every key can also be set through the environment, e.g. IGDB_FETCH_OUTPUT_ROOT.

# Metadata service endpoint.
api_url = "https://api.igdb.com/v4"

# Image host and the size used for covers and screenshots.
image_url = "https://images.igdb.com/igdb/image/upload"
image_size = "1080p"

# Maximum number of games returned by a search.
search_limit = 10

# Where result directories are created.
output_root = "."

# Where igdb-fetch.log is appended.
log_dir = "logs"
"#;

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Metadata service base URL.
    pub api_url: String,
    /// Image host base URL.
    pub image_url: String,
    /// Size token inserted into image URLs.
    pub image_size: String,
    /// Maximum number of games per search.
    pub search_limit: u32,
    /// Directory result directories are created in.
    pub output_root: PathBuf,
    /// Directory for the log file.
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            output_root: PathBuf::from("."),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl AppConfig {
    /// Load from the default config file location and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load using `path` as the config file. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::builder(path)?
            .add_source(Environment::with_prefix("IGDB_FETCH").try_parsing(true))
            .build()
            .context("failed to assemble configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    fn builder(path: &Path) -> Result<ConfigBuilder<DefaultState>> {
        let defaults = AppConfig::default();
        let builder = Config::builder()
            .set_default("api_url", defaults.api_url)?
            .set_default("image_url", defaults.image_url)?
            .set_default("image_size", defaults.image_size)?
            .set_default("search_limit", i64::from(defaults.search_limit))?
            .set_default("output_root", defaults.output_root.to_string_lossy().to_string())?
            .set_default("log_dir", defaults.log_dir.to_string_lossy().to_string())?
            .add_source(File::from(path.to_path_buf()).required(false));
        Ok(builder)
    }
}

/// Location of the user's config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("config.toml")
}

/// Write the commented default config file if none exists yet.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path();
    ensure_default_config_at(&path)?;
    Ok(path)
}

/// Write the default config to `path` unless a file is already there.
pub fn ensure_default_config_at(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))
}
