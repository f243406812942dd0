//! Error types for the movie finder.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the movie finder.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("TMDB API key not configured. Set TMDB_API_KEY environment variable")]
    TmdbApiKeyMissing,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Catalog errors
    #[error("Catalog API returned {status}: {message}")]
    CatalogApi { status: u16, message: String },

    // Library errors
    #[error("Movie {0} is already in the library")]
    RecordExists(i64),

    #[error("Movie {0} is not in the library")]
    RecordNotFound(i64),

    #[error("Invalid library file: {0}")]
    InvalidLibraryFile(String),

    // Preference errors
    #[error("Unknown preference key: {0}")]
    UnknownPreference(String),

    #[error("Invalid value for preference {key}: {value}")]
    InvalidPreferenceValue { key: String, value: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // TOML errors
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
