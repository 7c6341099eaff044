//! CLI command handlers

pub mod commands;

pub use commands::{colors, inspect, process};
