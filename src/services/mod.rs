//! External service clients.

pub mod catalog;
