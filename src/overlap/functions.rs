//! Function-pointer wrapper for overlap collaborators.

use super::traits::{FrameMatches, SpatioTemporalOverlap};

/// Whole-track IoU function type.
pub type TrackIouFn<T> = fn(&T, &[T]) -> Vec<f64>;

/// Per-frame matched IoU function type.
pub type FrameMatchesFn<T> = fn(&T, &[T]) -> Vec<FrameMatches>;

/// Wrapper turning a pair of plain functions into a `SpatioTemporalOverlap`.
pub struct OverlapFunctions<T> {
    iou_fn: TrackIouFn<T>,
    matches_fn: FrameMatchesFn<T>,
}

impl<T> OverlapFunctions<T> {
    /// Create a new OverlapFunctions wrapper.
    pub fn new(iou_fn: TrackIouFn<T>, matches_fn: FrameMatchesFn<T>) -> Self {
        Self { iou_fn, matches_fn }
    }
}

impl<T> Clone for OverlapFunctions<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for OverlapFunctions<T> {}

impl<T> SpatioTemporalOverlap<T> for OverlapFunctions<T> {
    #[inline]
    fn spatio_temporal_iou(&self, track: &T, candidates: &[T]) -> Vec<f64> {
        (self.iou_fn)(track, candidates)
    }

    #[inline]
    fn spatio_temporal_iou_matches(&self, track: &T, candidates: &[T]) -> Vec<FrameMatches> {
        (self.matches_fn)(track, candidates)
    }
}
