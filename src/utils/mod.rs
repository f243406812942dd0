//! Shared helpers.

pub mod dates;
pub mod fs;
