//! Ground-truth frame recovery over a grid of IoU thresholds.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use super::sets::{GroundTruthSet, PredictionSet};
use crate::overlap::{frame_matches, track_iou, SpatioTemporalOverlap};
use crate::track::Track;
use crate::utils::{linspace, same_threshold, validate_thresholds};
use crate::{Error, Result};

/// How the single winning prediction of a video is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Highest prediction score.
    #[serde(rename = "take_max_score")]
    MaxScore,
    /// Highest whole-track spatio-temporal IoU with the ground truth.
    #[default]
    #[serde(rename = "take_max_stiou")]
    MaxTrackIou,
}

impl SelectionMode {
    pub fn name(&self) -> &'static str {
        match self {
            SelectionMode::MaxScore => "take_max_score",
            SelectionMode::MaxTrackIou => "take_max_stiou",
        }
    }

    /// Suffix appended to metric labels.
    pub fn label_suffix(&self) -> &'static str {
        match self {
            SelectionMode::MaxScore => "(max scr)",
            SelectionMode::MaxTrackIou => "(max iou)",
        }
    }
}

impl FromStr for SelectionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "take_max_score" => Ok(SelectionMode::MaxScore),
            "take_max_stiou" => Ok(SelectionMode::MaxTrackIou),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Default calibration grid: 10 thresholds in [0.5, 0.95].
pub fn default_iou_thresholds() -> Vec<f64> {
    linspace(0.5, 0.95, 10)
}

/// Recovery of ground-truth frames at each IoU threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryMetrics {
    /// IoU thresholds, in the order they were given.
    pub thresholds: Vec<f64>,
    /// Percentage of ground-truth frames recovered, per threshold.
    pub recovery: DVector<f64>,
    /// Accurate frames summed over the winning predictions, per threshold.
    pub accurate_frames: Vec<usize>,
    /// Ground-truth frames summed over all videos, per threshold.
    pub total_frames: Vec<usize>,
    /// IoU summed over the accurate frames of the winners, per threshold.
    pub accurate_iou_sum: DVector<f64>,
}

impl RecoveryMetrics {
    /// Logical name of the metric.
    pub const METRIC_NAME: &'static str = "% recovery";

    fn zeros(thresholds: &[f64]) -> Self {
        let n = thresholds.len();
        Self {
            thresholds: thresholds.to_vec(),
            recovery: DVector::zeros(n),
            accurate_frames: vec![0; n],
            total_frames: vec![0; n],
            accurate_iou_sum: DVector::zeros(n),
        }
    }

    /// Mean recovery over all thresholds.
    pub fn mean(&self) -> f64 {
        if self.recovery.is_empty() {
            0.0
        } else {
            self.recovery.mean()
        }
    }

    /// Recovery at `threshold`, if it is part of the grid.
    pub fn at(&self, threshold: f64) -> Option<f64> {
        self.thresholds
            .iter()
            .position(|&t| same_threshold(t, threshold))
            .map(|idx| self.recovery[idx])
    }

    /// (threshold, recovery) pairs in grid order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.thresholds.iter().copied().zip(self.recovery.iter().copied())
    }
}

/// Per-prediction statistics against the video's ground truth.
///
/// Predictions are indexed in descending score order. The whole-track IoU
/// and ground-truth length do not depend on the threshold and are stored
/// once per prediction.
struct PerPredictionStats {
    /// Whole-track IoU (n_predictions).
    track_iou: DVector<f64>,
    /// Ground-truth length (n_predictions).
    total_frames: Vec<usize>,
    /// Frames with IoU >= threshold (n_thresholds x n_predictions).
    accurate_frames: DMatrix<usize>,
    /// Sum of IoU over those frames (n_thresholds x n_predictions).
    accurate_iou_sum: DMatrix<f64>,
}

impl PerPredictionStats {
    fn compute<T, O>(
        ground_truth: &GroundTruthSet<T>,
        predictions: &[(usize, &T)],
        iou_thresholds: &[f64],
        overlap: &O,
    ) -> Result<Self>
    where
        T: Track,
        O: SpatioTemporalOverlap<T> + ?Sized,
    {
        let n_thr = iou_thresholds.len();
        let n_pred = predictions.len();

        let mut stats = Self {
            track_iou: DVector::zeros(n_pred),
            total_frames: vec![0; n_pred],
            accurate_frames: DMatrix::zeros(n_thr, n_pred),
            accurate_iou_sum: DMatrix::zeros(n_thr, n_pred),
        };

        for (idx, &(video_id, prediction)) in predictions.iter().enumerate() {
            // Predictions on videos without ground truth are false positives
            let Some(gt) = ground_truth.get(video_id) else {
                debug!("ignoring false positive prediction {} on video {}", idx, video_id);
                continue;
            };

            stats.track_iou[idx] = track_iou(overlap, prediction, gt)?;
            stats.total_frames[idx] = gt.length();

            let matched: Vec<f64> = frame_matches(overlap, prediction, gt)?
                .into_values()
                .collect();

            for (tidx, &iou_thr) in iou_thresholds.iter().enumerate() {
                let accurate = matched.iter().filter(|&&iou| iou >= iou_thr);
                let (count, sum) = accurate.fold((0usize, 0.0), |(c, s), &iou| (c + 1, s + iou));
                stats.accurate_frames[(tidx, idx)] = count;
                stats.accurate_iou_sum[(tidx, idx)] = sum;
            }
        }

        Ok(stats)
    }
}

/// Index of the first maximum of `key` over `candidates`.
fn first_argmax(candidates: &[usize], key: impl Fn(usize) -> f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for &idx in candidates {
        let value = key(idx);
        if best.map_or(true, |(_, best_value)| value > best_value) {
            best = Some((idx, value));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Compute the % of ground-truth frames accurately recovered by the predictions.
///
/// For every ground-truth video a single prediction is matched: the one with
/// the highest score or the highest whole-track IoU, depending on `mode`. Ties
/// go to the earliest prediction in descending score order (submission order
/// among equal scores).
///
/// # Arguments
/// * `ground_truth` - One ground-truth track per video
/// * `predictions` - Scored predicted tracks; those on videos without ground truth are ignored
/// * `iou_thresholds` - Per-frame IoU thresholds, each in (0, 1]
/// * `mode` - Winner selection mode
/// * `overlap` - Spatio-temporal overlap collaborator
///
/// # Returns
/// Recovery percentage per threshold. All zeros if there are no predictions.
///
/// # Errors
/// `Error::MissingPredictions` if a ground-truth video has no prediction.
pub fn compute_tracking_metrics<T, O>(
    ground_truth: &GroundTruthSet<T>,
    predictions: &PredictionSet<T>,
    iou_thresholds: &[f64],
    mode: SelectionMode,
    overlap: &O,
) -> Result<RecoveryMetrics>
where
    T: Track,
    O: SpatioTemporalOverlap<T> + ?Sized,
{
    validate_thresholds(iou_thresholds)?;

    let mut metrics = RecoveryMetrics::zeros(iou_thresholds);
    if predictions.is_empty() {
        return Ok(metrics);
    }

    // Sort predictions by decreasing score (stable)
    let mut ordered: Vec<(usize, &T)> = predictions.iter().collect();
    ordered.sort_by(|a, b| b.1.score().total_cmp(&a.1.score()));

    let stats = PerPredictionStats::compute(ground_truth, &ordered, iou_thresholds, overlap)?;

    let mut by_video: HashMap<usize, Vec<usize>> = HashMap::new();
    for (idx, &(video_id, _)) in ordered.iter().enumerate() {
        by_video.entry(video_id).or_default().push(idx);
    }

    for (video_id, _) in ground_truth.iter() {
        let candidates = by_video
            .get(&video_id)
            .ok_or(Error::MissingPredictions { video_id })?;

        let winner = match mode {
            SelectionMode::MaxScore => first_argmax(candidates, |idx| ordered[idx].1.score()),
            SelectionMode::MaxTrackIou => first_argmax(candidates, |idx| stats.track_iou[idx]),
        }
        .ok_or(Error::MissingPredictions { video_id })?;

        trace!(
            "video {}: winner {} (score {:.4}, track IoU {:.4})",
            video_id,
            winner,
            ordered[winner].1.score(),
            stats.track_iou[winner]
        );

        for tidx in 0..iou_thresholds.len() {
            metrics.accurate_frames[tidx] += stats.accurate_frames[(tidx, winner)];
            metrics.accurate_iou_sum[tidx] += stats.accurate_iou_sum[(tidx, winner)];
            metrics.total_frames[tidx] += stats.total_frames[winner];
        }
    }

    for tidx in 0..iou_thresholds.len() {
        let total = metrics.total_frames[tidx];
        if total > 0 {
            metrics.recovery[tidx] = 100.0 * metrics.accurate_frames[tidx] as f64 / total as f64;
        }
    }

    debug!(
        "{} ({}) over {} videos, {} predictions: mean {:.2}",
        RecoveryMetrics::METRIC_NAME,
        mode,
        ground_truth.len(),
        predictions.len(),
        metrics.mean()
    );

    Ok(metrics)
}
