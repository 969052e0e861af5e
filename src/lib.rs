//! # track-recovery - Response Track Recovery Metrics
//!
//! Scores visual query tracking results: for each video, one predicted
//! response track is matched against the ground-truth track, and the
//! percentage of ground-truth frames recovered with a per-frame IoU above
//! a threshold is pooled over the whole split.
//!
//! ## Features
//!
//! - Winner selection by prediction score or by whole-track spatio-temporal IoU
//! - Multiple IoU thresholds evaluated in a single pass
//! - Pluggable spatio-temporal overlap functions
//! - Labeled metrics output
//!
//! ## Example
//!
//! ```rust,ignore
//! use track_recovery::{TrackingMetrics, OverlapFunctions};
//!
//! let overlap = OverlapFunctions::new(my_st_iou, my_st_iou_matches);
//! let metrics = TrackingMetrics::with_mode_name(
//!     ground_truth,
//!     predictions,
//!     "take_max_score",
//!     false,
//!     overlap,
//! )?;
//! for (label, value) in metrics.get_metrics()? {
//!     println!("{label}: {value:.2}");
//! }
//! ```

// Public modules
pub mod track;
pub mod overlap;
pub mod metrics;
pub mod utils;

// Re-exports for convenience
pub use track::{FrameBox, ResponseTrack, Track};
pub use overlap::{FrameMatches, OverlapFunctions, SpatioTemporalOverlap};
pub use metrics::{
    compute_tracking_metrics, GroundTruthSet, LabeledMetrics, PredictionSet, RecoveryMetrics,
    SelectionMode, TrackingEvaluation, TrackingMetrics, TrackingMetricsConfig,
};

// Error types
pub use crate::error::{Error, Result};

mod error {
    use thiserror::Error;

    /// Errors that can occur while computing recovery metrics
    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),

        #[error("Invalid selection mode: {0} (expected take_max_score or take_max_stiou)")]
        InvalidMode(String),

        #[error("Invalid track: {0}")]
        InvalidTrack(String),

        #[error("No predictions for ground-truth video {video_id}")]
        MissingPredictions { video_id: usize },

        #[error("Duplicate ground truth for video {video_id}")]
        DuplicateGroundTruth { video_id: usize },

        #[error("Overlap function error: {0}")]
        OverlapError(String),

        #[error("Config parse error: {0}")]
        ConfigParse(#[from] serde_json::Error),

        #[error("IO error: {0}")]
        IoError(#[from] std::io::Error),
    }

    /// Result type for track-recovery operations
    pub type Result<T> = std::result::Result<T, Error>;
}
