//! Preferences command implementation.

use super::open_preferences;
use crate::cli::args::PrefsAction;
use crate::core::preferences::{PreferenceKey, PreferenceStore, Scalar};
use crate::models::config::Config;
use anyhow::Result;
use colored::Colorize;

/// Execute prefs subcommand.
pub async fn execute_prefs(config: &Config, action: PrefsAction) -> Result<()> {
    let mut store = open_preferences(config)?;

    match action {
        PrefsAction::List => {
            println!("{}", "Preferences".bold().cyan());
            println!();
            for key in PreferenceKey::ALL {
                print_value(&store, key);
            }
        }
        PrefsAction::Get { key } => {
            let key: PreferenceKey = key.parse()?;
            print_value(&store, key);
        }
        PrefsAction::Set { key, value } => {
            let key: PreferenceKey = key.parse()?;
            let value = key.parse_value(&value)?;
            store.set(key.as_str(), value)?;
            print_value(&store, key);
        }
        PrefsAction::Reset { key } => {
            let key: PreferenceKey = key.parse()?;
            store.reset(key.as_str())?;
            print_value(&store, key);
        }
    }

    Ok(())
}

fn print_value(store: &PreferenceStore, key: PreferenceKey) {
    let value = store.value(key);
    let shown = match (key, &value) {
        (
            PreferenceKey::PrimaryColor
            | PreferenceKey::SecondaryColor
            | PreferenceKey::BackgroundColor
            | PreferenceKey::TextColor,
            Scalar::Int(argb),
        ) => format!("#{:08X}", argb),
        _ => value.to_string(),
    };

    let source = if store.get(key.as_str()) == Some(&value) {
        ""
    } else {
        " (default)"
    };

    println!("{:<18} {}{}", key.as_str().bold(), shown, source.dimmed());
}
