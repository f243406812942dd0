//! CLI command implementations.

pub mod browse;
pub mod detail;
pub mod library;
pub mod prefs;

use crate::core::library::Library;
use crate::core::mapper::MappingOptions;
use crate::core::preferences::PreferenceStore;
use crate::models::config::Config;
use anyhow::{Context, Result};

/// Open the library configured in `config`.
pub(crate) fn open_library(config: &Config) -> Result<Library> {
    let path = config.library_path();
    Library::open(&path).with_context(|| format!("Failed to open library: {}", path.display()))
}

/// Open the preference store configured in `config`.
pub(crate) fn open_preferences(config: &Config) -> Result<PreferenceStore> {
    let path = config.preferences_path();
    PreferenceStore::open(&path)
        .with_context(|| format!("Failed to open preferences: {}", path.display()))
}

/// Mapping settings from the configuration and the user's date format.
pub(crate) fn mapping_options(config: &Config, preferences: &PreferenceStore) -> MappingOptions {
    MappingOptions {
        image_base_url: config.catalog.image_base_url.clone(),
        date_format: preferences.date_format(),
    }
}

/// Format a rating for display.
pub(crate) fn format_rating(vote_average: f64, vote_count: u32) -> String {
    if vote_count == 0 {
        "-".to_string()
    } else {
        format!("{:.1} ({})", vote_average, vote_count)
    }
}

/// Truncate text to `max` characters, appending an ellipsis.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(7.34, 1200), "7.3 (1200)");
        assert_eq!(format_rating(0.0, 0), "-");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Alien", 10), "Alien");
        assert_eq!(truncate("The Lord of the Rings", 8), "The Lor…");
    }
}
