//! Frame sinks.
//!
//! Sinks consume rendered frames in index order and are used by `FrameSequenceDriver::run`.

/// Numbered PNG sequence output.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
