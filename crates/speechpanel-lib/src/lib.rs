//! speechpanel-lib — Speech panel engine.
//!
//! Recognition and synthesis adapters over platform capabilities, the
//! `SpeechPanel` session that owns them, and an optional tokio driver.
//! Depends on speechpanel-core for pure types and settings.

pub mod engine;
pub mod events;
pub mod logging;
pub mod panel;
pub mod recognition;
pub mod runtime;
pub mod synthesis;

// Re-export speechpanel-core for convenience
pub use speechpanel_core;
