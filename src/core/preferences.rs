//! Key-value preference store.
//!
//! Values are scalars persisted as a JSON object. Typed readers never fail:
//! a missing key or a value of another type yields the caller's default. This
//! keeps stale or hand-edited files from breaking the application.

use crate::utils::fs::{load_json, save_json};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A stored preference value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Known preference keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKey {
    PrimaryColor,
    SecondaryColor,
    BackgroundColor,
    TextColor,
    DateFormat,
    ColorMode,
    ShowAdult,
    Notifications,
}

impl PreferenceKey {
    pub const ALL: [PreferenceKey; 8] = [
        PreferenceKey::PrimaryColor,
        PreferenceKey::SecondaryColor,
        PreferenceKey::BackgroundColor,
        PreferenceKey::TextColor,
        PreferenceKey::DateFormat,
        PreferenceKey::ColorMode,
        PreferenceKey::ShowAdult,
        PreferenceKey::Notifications,
    ];

    /// Identifier used in the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::PrimaryColor => "primary_color",
            PreferenceKey::SecondaryColor => "secondary_color",
            PreferenceKey::BackgroundColor => "background_color",
            PreferenceKey::TextColor => "text_color",
            PreferenceKey::DateFormat => "date_format",
            PreferenceKey::ColorMode => "color_mode",
            PreferenceKey::ShowAdult => "show_adult",
            PreferenceKey::Notifications => "notifications",
        }
    }

    /// Value used when the key is unset or holds another type.
    pub fn default_value(&self) -> Scalar {
        match self {
            PreferenceKey::PrimaryColor => Scalar::Int(0xFF62_00EE),
            PreferenceKey::SecondaryColor => Scalar::Int(0xFF03_DAC5),
            PreferenceKey::BackgroundColor => Scalar::Int(0xFFFF_FFFF),
            PreferenceKey::TextColor => Scalar::Int(0xFF00_0000),
            PreferenceKey::DateFormat => Scalar::Text(DEFAULT_DATE_FORMAT.to_string()),
            PreferenceKey::ColorMode => Scalar::Bool(false),
            PreferenceKey::ShowAdult => Scalar::Bool(false),
            PreferenceKey::Notifications => Scalar::Bool(true),
        }
    }

    /// Parse a user-supplied value into the key's type.
    ///
    /// Colors accept decimal or `#AARRGGBB` / `0xAARRGGBB` hex.
    pub fn parse_value(&self, raw: &str) -> Result<Scalar> {
        let invalid = || Error::InvalidPreferenceValue {
            key: self.as_str().to_string(),
            value: raw.to_string(),
        };
        let raw = raw.trim();

        match self.default_value() {
            Scalar::Bool(_) => match raw.to_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => Ok(Scalar::Bool(true)),
                "false" | "off" | "no" | "0" => Ok(Scalar::Bool(false)),
                _ => Err(invalid()),
            },
            Scalar::Int(_) => {
                let hex = raw
                    .strip_prefix('#')
                    .or_else(|| raw.strip_prefix("0x"))
                    .or_else(|| raw.strip_prefix("0X"));
                let parsed = match hex {
                    Some(digits) => i64::from_str_radix(digits, 16),
                    None => raw.parse(),
                };
                parsed.map(Scalar::Int).map_err(|_| invalid())
            }
            Scalar::Text(_) if raw.is_empty() => Err(invalid()),
            Scalar::Text(_) => Ok(Scalar::Text(raw.to_string())),
        }
    }
}

impl std::str::FromStr for PreferenceKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PreferenceKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| Error::UnknownPreference(s.to_string()))
    }
}

/// Default display format for release dates.
pub const DEFAULT_DATE_FORMAT: &str = "yyyy-MM-dd";

/// Typed view of the appearance preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub primary_color: i64,
    pub secondary_color: i64,
    pub background_color: i64,
    pub text_color: i64,
    pub date_format: String,
    pub dark_mode: bool,
    pub show_adult: bool,
    pub notifications: bool,
}

/// Preference store backed by a JSON file, or kept in memory.
#[derive(Debug, Default)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
    values: BTreeMap<String, Scalar>,
}

impl PreferenceStore {
    /// Open the store at `path`, starting empty when the file is missing.
    ///
    /// Entries that are not a boolean, integer or string (floats, `null`,
    /// arrays, objects) are skipped with a warning.
    pub fn open(path: &Path) -> Result<Self> {
        let stored: BTreeMap<String, serde_json::Value> = load_json(path)?.unwrap_or_default();

        let mut values = BTreeMap::new();
        for (key, raw) in stored {
            match serde_json::from_value::<Scalar>(raw) {
                Ok(value) => {
                    values.insert(key, value);
                }
                Err(_) => {
                    tracing::warn!(
                        "Ignoring preference '{}' in {}: unsupported value",
                        key,
                        path.display()
                    );
                }
            }
        }

        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
        })
    }

    /// Store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.values.get(key)
    }

    /// Set `key` and persist the store before returning.
    pub fn set(&mut self, key: &str, value: Scalar) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.persist()
    }

    /// Remove `key` so its default applies again.
    pub fn reset(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    /// Boolean value, or `default` when absent or not a boolean.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Scalar::Bool(b)) => *b,
            _ => default,
        }
    }

    /// Integer value, or `default` when absent or not an integer.
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            Some(Scalar::Int(i)) => *i,
            _ => default,
        }
    }

    /// Text value, or `default` when absent or not text.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(Scalar::Text(s)) => s.clone(),
            _ => default.to_string(),
        }
    }

    /// Value for a known key, falling back to its default.
    pub fn value(&self, key: PreferenceKey) -> Scalar {
        match (key.default_value(), self.get(key.as_str())) {
            (Scalar::Bool(_), Some(v @ Scalar::Bool(_)))
            | (Scalar::Int(_), Some(v @ Scalar::Int(_)))
            | (Scalar::Text(_), Some(v @ Scalar::Text(_))) => v.clone(),
            (default, _) => default,
        }
    }

    /// Display format for release dates.
    pub fn date_format(&self) -> String {
        self.get_string(PreferenceKey::DateFormat.as_str(), DEFAULT_DATE_FORMAT)
    }

    /// Whether adult titles are shown.
    pub fn show_adult(&self) -> bool {
        self.get_bool(PreferenceKey::ShowAdult.as_str(), false)
    }

    /// Snapshot of every appearance preference.
    pub fn appearance(&self) -> Appearance {
        let int = |key: PreferenceKey| match self.value(key) {
            Scalar::Int(i) => i,
            _ => 0,
        };
        let flag = |key: PreferenceKey| matches!(self.value(key), Scalar::Bool(true));

        Appearance {
            primary_color: int(PreferenceKey::PrimaryColor),
            secondary_color: int(PreferenceKey::SecondaryColor),
            background_color: int(PreferenceKey::BackgroundColor),
            text_color: int(PreferenceKey::TextColor),
            date_format: self.date_format(),
            dark_mode: flag(PreferenceKey::ColorMode),
            show_adult: flag(PreferenceKey::ShowAdult),
            notifications: flag(PreferenceKey::Notifications),
        }
    }

    fn persist(&self) -> Result<()> {
        if let Some(ref path) = self.path {
            save_json(path, &self.values)?;
            tracing::debug!("Preferences saved to: {}", path.display());
        }
        Ok(())
    }
}
