//! Data models.

pub mod config;
pub mod local;
pub mod movie;
pub mod resource;
