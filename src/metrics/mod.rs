//! Ground-truth frame recovery metrics.
//!
//! This module provides tools for scoring visual query tracking results
//! against one ground-truth response track per video. It includes:
//!
//! - `GroundTruthSet` / `PredictionSet` - Inputs keyed by video id
//! - `compute_tracking_metrics` - % of ground-truth frames recovered per IoU threshold
//! - `TrackingMetrics` - Labeled metrics over a benchmark split

mod sets;
mod aggregator;
mod tracking;

pub use sets::{GroundTruthSet, PredictionSet};
pub use aggregator::{
    compute_tracking_metrics, default_iou_thresholds, RecoveryMetrics, SelectionMode,
};
pub use tracking::{LabeledMetrics, TrackingEvaluation, TrackingMetrics, TrackingMetricsConfig};
