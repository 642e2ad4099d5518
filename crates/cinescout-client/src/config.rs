use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_MIN_LOADING_MS: u64 = 2000;

/// Configuration for cinescout.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (CINESCOUT_* prefix)
/// 3. Config file (~/.config/cinescout/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base address of the recommendation service.
    ///
    /// Can be set via:
    /// - CLI: --base-url http://host:port
    /// - ENV: CINESCOUT_BASE_URL
    /// - Config: base_url = "..."
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Prefix joined to the partial poster paths returned by the service.
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Minimum time the results view shows its loading animation.
    #[serde(default = "default_min_loading_ms")]
    pub min_loading_ms: u64,

    /// Logger settings. The wizard only installs a logger when this is set.
    #[serde(default)]
    pub logging: Option<twyg::Opts>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            min_loading_ms: DEFAULT_MIN_LOADING_MS,
            logging: None,
        }
    }
}

impl Config {
    /// Load configuration from the default config file and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `config_path` (if it exists) and the
    /// CINESCOUT_* environment variables.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new()
            .context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path.to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder.add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("cinescout");
        builder.add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build()
            .context("Failed to build configuration")?;

        log::debug!("Loaded configuration: base_url={}", config.base_url);
        Ok(config)
    }

    /// Replace the service base address (used by the --base-url flag).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn min_loading(&self) -> Duration {
        Duration::from_millis(self.min_loading_ms)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

fn default_min_loading_ms() -> u64 {
    DEFAULT_MIN_LOADING_MS
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/cinescout/config.toml
/// - macOS: ~/Library/Application Support/cinescout/config.toml
/// - Windows: %APPDATA%\cinescout\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cinescout")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Cinescout Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (CINESCOUT_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Address of the movie recommendation service
#
# Can also be set via:
# - CLI: cinescout --base-url http://host:8000
# - Environment: CINESCOUT_BASE_URL=http://host:8000
base_url = "http://127.0.0.1:8000"

# Prefix for the poster paths returned by the service
image_base_url = "https://image.tmdb.org/t/p/w500"

# Minimum time (milliseconds) the results view shows its loading animation
min_loading_ms = 2000

# Logging. The wizard runs full-screen, so it only installs a logger when
# this table is present; point the output at a file when using it there.
#[logging]
#coloured = false
#level = "debug"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config())
        .context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.min_loading(), Duration::from_secs(2));
        assert!(config.logging.is_none());
    }

    #[test]
    fn test_config_load_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("missing.toml"));
        assert!(config.is_ok());
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "base_url = \"http://movies.local:9000\"\nmin_loading_ms = 250\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, "http://movies.local:9000");
        assert_eq!(config.min_loading_ms, 250);
        assert_eq!(config.image_base_url, DEFAULT_IMAGE_BASE_URL);
    }

    #[test]
    fn test_with_base_url() {
        let config = Config::default().with_base_url("http://10.0.0.2:8000");
        assert_eq!(config.base_url, "http://10.0.0.2:8000");
    }

    #[test]
    fn test_example_config_mentions_every_key() {
        let example = example_config();
        for key in ["base_url", "image_base_url", "min_loading_ms", "logging"] {
            assert!(example.contains(key), "example config missing {key}");
        }
    }
}
