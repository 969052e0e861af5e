//! Spatio-temporal overlap trait definition.

use std::collections::HashMap;

/// Per-frame matched IoU, keyed by frame number.
///
/// Frames missing from the map have an effective IoU of 0.
pub type FrameMatches = HashMap<usize, f64>;

/// Trait for the spatio-temporal overlap between tracks.
///
/// The geometry itself lives with the caller; the metrics only consume
/// these two results.
pub trait SpatioTemporalOverlap<T>: Send + Sync {
    /// Whole-track IoU between `track` and each candidate.
    ///
    /// # Returns
    /// One value in [0, 1] per candidate, in candidate order.
    fn spatio_temporal_iou(&self, track: &T, candidates: &[T]) -> Vec<f64>;

    /// Per-frame matched IoU between `track` and each candidate.
    ///
    /// # Returns
    /// One `FrameMatches` per candidate, in candidate order.
    fn spatio_temporal_iou_matches(&self, track: &T, candidates: &[T]) -> Vec<FrameMatches>;
}
