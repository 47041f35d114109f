/// Exponentially smoothed camera center.
pub mod state;
