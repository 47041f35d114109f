//! Spline chain model, text loader and forward evaluation cursor.

/// Forward-only evaluation cursor and point history.
pub mod cursor;
/// Spline-chain text format reader.
pub mod load;
/// Control points and per-segment cubic coefficients.
pub mod model;
