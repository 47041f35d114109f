/// Run configuration.
pub mod config;
/// Per-frame driver loop.
pub mod driver;
