//! Core business logic modules.

pub mod details;
pub mod library;
pub mod lookup;
pub mod mapper;
pub mod paginator;
pub mod preferences;
