//! Spatio-temporal overlap collaborators.
//!
//! This module provides:
//! - `SpatioTemporalOverlap` trait for overlap implementations
//! - `OverlapFunctions` - wrapper for a pair of plain functions
//! - `track_iou` / `frame_matches` - single-candidate lookups used by the metrics

mod traits;
mod functions;

pub use traits::{FrameMatches, SpatioTemporalOverlap};
pub use functions::{FrameMatchesFn, OverlapFunctions, TrackIouFn};

use crate::{Error, Result};

/// Whole-track IoU of `track` against a single `reference` track.
pub fn track_iou<T, O>(overlap: &O, track: &T, reference: &T) -> Result<f64>
where
    O: SpatioTemporalOverlap<T> + ?Sized,
{
    overlap
        .spatio_temporal_iou(track, std::slice::from_ref(reference))
        .first()
        .copied()
        .ok_or_else(|| Error::OverlapError("spatio_temporal_iou returned no value".to_string()))
}

/// Per-frame matched IoU of `track` against a single `reference` track.
pub fn frame_matches<T, O>(overlap: &O, track: &T, reference: &T) -> Result<FrameMatches>
where
    O: SpatioTemporalOverlap<T> + ?Sized,
{
    overlap
        .spatio_temporal_iou_matches(track, std::slice::from_ref(reference))
        .into_iter()
        .next()
        .ok_or_else(|| {
            Error::OverlapError("spatio_temporal_iou_matches returned no value".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_iou(_track: &u32, candidates: &[u32]) -> Vec<f64> {
        candidates.iter().map(|&c| c as f64 / 10.0).collect()
    }

    fn no_matches(_track: &u32, _candidates: &[u32]) -> Vec<FrameMatches> {
        Vec::new()
    }

    #[test]
    fn test_track_iou_single_candidate() {
        let overlap = OverlapFunctions::new(constant_iou, no_matches);
        assert_eq!(track_iou(&overlap, &0, &7).unwrap(), 0.7);
    }

    #[test]
    fn test_short_iou_result_is_error() {
        fn no_iou(_track: &u32, _candidates: &[u32]) -> Vec<f64> {
            Vec::new()
        }

        let overlap = OverlapFunctions::new(no_iou, no_matches);
        assert!(matches!(
            track_iou(&overlap, &0, &7),
            Err(Error::OverlapError(_))
        ));
    }

    #[test]
    fn test_short_result_is_error() {
        let overlap = OverlapFunctions::new(constant_iou, no_matches);
        assert!(matches!(
            frame_matches(&overlap, &0, &7),
            Err(Error::OverlapError(_))
        ));
    }
}
