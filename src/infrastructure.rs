//! Infrastructure layer
//!
//! - Terminal text measurement
//! - CLI argument processing
//! - Configuration files
//! - TUI foundation

pub mod cell_probe;
pub mod cli;
pub mod config;
pub mod tui;
