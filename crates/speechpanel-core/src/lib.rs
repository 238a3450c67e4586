//! speechpanel-core — Pure types, errors and settings.
//!
//! No async runtime, no I/O, no platform dependencies.

pub mod config;
pub mod error;
pub mod text;
pub mod types;
