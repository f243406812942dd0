//! Movie Finder Library
//!
//! Browse the TMDB catalog page by page, inspect movie details and keep a local
//! library of favorites, notes and sponsored entries.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
