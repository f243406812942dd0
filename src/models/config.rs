//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog (TMDB) configuration.
    pub catalog: CatalogConfig,
    /// Directory holding the library and preference files.
    pub data_dir: PathBuf,
}

/// Catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// API key or Bearer token.
    pub api_key: Option<String>,
    /// Region used for listings (ISO 3166-1).
    pub region: String,
    /// Language for responses.
    pub language: String,
    /// API base URL.
    pub base_url: String,
    /// Image CDN base URL.
    pub image_base_url: String,
    /// Maximum page the catalog serves.
    pub max_pages: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            data_dir: default_data_dir(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("TMDB_API_KEY").ok(),
            region: std::env::var("TMDB_REGION").unwrap_or_else(|_| "US".to_string()),
            language: "en-US".to_string(),
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p/".to_string(),
            max_pages: 500,
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Path of the favorites library file.
    pub fn library_path(&self) -> PathBuf {
        self.data_dir.join("library.json")
    }

    /// Path of the preferences file.
    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir.join("preferences.json")
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("movie_finder")
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("movie_finder")
}

/// Load configuration from the default location.
pub fn load_config() -> crate::Result<Config> {
    load_config_from(&dirs_config_path().join("config.toml"))
}

/// Load configuration from a file, falling back to defaults when it is missing.
///
/// Environment variables override the file: `TMDB_API_KEY` and `TMDB_REGION`.
pub fn load_config_from(path: &Path) -> crate::Result<Config> {
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)?;
        toml::from_str::<Config>(&content)?
    } else {
        tracing::debug!("No config file at {}, using defaults", path.display());
        Config::default()
    };

    if let Ok(key) = std::env::var("TMDB_API_KEY") {
        config.catalog.api_key = Some(key);
    }
    if let Ok(region) = std::env::var("TMDB_REGION") {
        config.catalog.region = region;
    }

    if config.catalog.max_pages == 0 {
        return Err(crate::Error::InvalidConfig(
            "catalog.max_pages must be at least 1".to_string(),
        ));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = \"/tmp/movies\"\n[catalog]\nmax_pages = 20\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/movies"));
        assert_eq!(config.catalog.max_pages, 20);
        assert_eq!(config.catalog.language, "en-US");
        assert_eq!(config.library_path(), PathBuf::from("/tmp/movies/library.json"));
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[catalog]\nmax_pages = 0\n").unwrap();

        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_config_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.catalog.max_pages, 500);
        assert_eq!(config.catalog.timeout_secs, 30);
    }
}
