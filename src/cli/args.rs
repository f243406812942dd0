//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Movie Finder - Discover movies and keep a local favorites library
#[derive(Parser, Debug)]
#[command(name = "movie-finder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    /// Path to config.toml (default: user config directory)
    #[arg(long, global = true, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse popular movies page by page
    Browse {
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Show details for a movie
    Detail {
        /// TMDB movie ID
        #[arg(value_name = "ID")]
        id: i64,

        /// Save the movie to the library as a favorite
        #[arg(long)]
        save: bool,
    },

    /// Manage the local library
    Library {
        #[command(subcommand)]
        action: LibraryAction,
    },

    /// Manage preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum LibraryAction {
    /// List saved movies
    List {
        /// Filter: all, favorites, watched, sponsored
        #[arg(long, default_value = "all")]
        filter: String,
    },

    /// Show a saved movie
    Show {
        /// Movie ID
        #[arg(value_name = "ID", allow_hyphen_values = true)]
        id: i64,
    },

    /// Remove a movie from the library
    Remove {
        /// Movie ID
        #[arg(value_name = "ID", allow_hyphen_values = true)]
        id: i64,
    },

    /// Attach a personal note to a saved movie
    Note {
        /// Movie ID
        #[arg(value_name = "ID", allow_hyphen_values = true)]
        id: i64,

        /// Note text (empty clears the note)
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Mark a saved movie as watched
    Watched {
        /// Movie ID
        #[arg(value_name = "ID", allow_hyphen_values = true)]
        id: i64,

        /// Clear the watched flag instead
        #[arg(long)]
        unset: bool,
    },

    /// Add a sponsored movie entry
    Sponsor {
        /// Movie title
        #[arg(long)]
        title: String,

        /// Overview/synopsis
        #[arg(long, default_value = "")]
        overview: String,

        /// Release date (YYYY-MM-DD)
        #[arg(long)]
        release_date: Option<String>,

        /// Comma-separated genre names
        #[arg(long, value_delimiter = ',')]
        genres: Vec<String>,

        /// Poster URL
        #[arg(long, default_value = "")]
        poster_url: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PrefsAction {
    /// List all preferences with their effective values
    List,

    /// Show a single preference
    Get {
        /// Preference key (e.g., date_format)
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Set a preference
    Set {
        /// Preference key (e.g., color_mode)
        #[arg(value_name = "KEY")]
        key: String,

        /// New value
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Restore a preference to its default
    Reset {
        /// Preference key
        #[arg(value_name = "KEY")]
        key: String,
    },
}
