//! Command-line task tracker backed by a single JSON file.

pub mod commands;
pub mod error;
pub mod model;
pub mod output;
pub mod store;
