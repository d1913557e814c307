//! CLI subcommand handlers.
//!
//! Keeps `cli.rs` limited to argument definitions and dispatch.

pub mod completions;
pub mod config;
pub mod version;
