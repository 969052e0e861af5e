//! Labeled tracking metrics over a set of videos.

use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use super::aggregator::{
    compute_tracking_metrics, default_iou_thresholds, RecoveryMetrics, SelectionMode,
};
use super::sets::{GroundTruthSet, PredictionSet};
use crate::overlap::SpatioTemporalOverlap;
use crate::track::Track;
use crate::utils::{format_metric_label, same_threshold, validate_thresholds};
use crate::{Error, Result};

/// Labeled metric values, in report order (mean first).
pub type LabeledMetrics = Vec<(String, f64)>;

/// Configuration for `TrackingMetrics`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackingMetricsConfig {
    /// Winner selection mode.
    pub mode: SelectionMode,

    /// Skip the mean-over-thresholds entry in `get_metrics`.
    pub ignore_iou_averaging: bool,

    /// Reporting grid; its mean is reported.
    pub iou_thresholds: Vec<f64>,

    /// Full calibration grid, evaluated alongside the reporting grid.
    pub calibration_thresholds: Vec<f64>,

    /// Reporting thresholds also reported individually.
    pub ious_to_report: Vec<f64>,

    /// Prefix of every metric label.
    pub metric_uuid: String,
}

impl Default for TrackingMetricsConfig {
    fn default() -> Self {
        Self::new(SelectionMode::MaxScore)
    }
}

impl TrackingMetricsConfig {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ignore_iou_averaging: false,
            iou_thresholds: vec![0.5, 0.75, 0.95],
            calibration_thresholds: default_iou_thresholds(),
            ious_to_report: vec![0.5],
            metric_uuid: "Tracking".to_string(),
        }
    }

    /// Create configuration from a mode name (`take_max_score` or `take_max_stiou`).
    pub fn from_mode_name(name: &str) -> Result<Self> {
        Ok(Self::new(name.parse()?))
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Check both threshold grids and the individually reported subset.
    pub fn validate(&self) -> Result<()> {
        validate_thresholds(&self.iou_thresholds)?;
        validate_thresholds(&self.calibration_thresholds)?;

        for &iou in &self.ious_to_report {
            if !self.iou_thresholds.iter().any(|&t| same_threshold(t, iou)) {
                return Err(Error::InvalidConfig(format!(
                    "IoU {} is reported individually but is not in the reporting grid",
                    iou
                )));
            }
        }

        Ok(())
    }
}

/// Results of both threshold grids.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingEvaluation {
    /// Recovery over the calibration grid.
    pub calibration: RecoveryMetrics,
    /// Recovery over the reporting grid.
    pub reporting: RecoveryMetrics,
}

impl TrackingEvaluation {
    /// Mean recovery over the reporting grid.
    pub fn average(&self) -> f64 {
        self.reporting.mean()
    }

    /// Mean recovery over the calibration grid.
    pub fn calibration_average(&self) -> f64 {
        self.calibration.mean()
    }
}

/// Ground-truth frame recovery for a benchmark split.
///
/// Video `i` has ground truth `ground_truth[i]` and candidate tracks
/// `predictions[i]`. Every ground-truth video needs at least one prediction.
pub struct TrackingMetrics<T, O> {
    ground_truth: GroundTruthSet<T>,
    predictions: PredictionSet<T>,
    config: TrackingMetricsConfig,
    overlap: O,
}

impl<T, O> TrackingMetrics<T, O>
where
    T: Track,
    O: SpatioTemporalOverlap<T>,
{
    /// Create new tracking metrics.
    ///
    /// # Arguments
    /// * `ground_truth` - One ground-truth track per video
    /// * `predictions` - Scored candidate tracks per video, aligned with `ground_truth`
    /// * `config` - Metrics configuration (validated here)
    /// * `overlap` - Spatio-temporal overlap collaborator
    pub fn new(
        ground_truth: Vec<T>,
        predictions: Vec<Vec<T>>,
        config: TrackingMetricsConfig,
        overlap: O,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            ground_truth: GroundTruthSet::from_tracks(ground_truth),
            predictions: PredictionSet::from_nested(predictions),
            config,
            overlap,
        })
    }

    /// Create tracking metrics with default grids from a mode name.
    ///
    /// Fails with `Error::InvalidMode` for an unknown mode.
    pub fn with_mode_name(
        ground_truth: Vec<T>,
        predictions: Vec<Vec<T>>,
        mode: &str,
        ignore_iou_averaging: bool,
        overlap: O,
    ) -> Result<Self> {
        let mut config = TrackingMetricsConfig::from_mode_name(mode)?;
        config.ignore_iou_averaging = ignore_iou_averaging;
        Self::new(ground_truth, predictions, config, overlap)
    }

    pub fn config(&self) -> &TrackingMetricsConfig {
        &self.config
    }

    /// Label suffix of the selection mode, e.g. `(max scr)`.
    pub fn suffix(&self) -> &'static str {
        self.config.mode.label_suffix()
    }

    /// Metric name shared by every label, e.g. `Tracking % recovery (max scr)`.
    pub fn metric_name(&self) -> String {
        format!(
            "{} {} {}",
            self.config.metric_uuid,
            RecoveryMetrics::METRIC_NAME,
            self.suffix()
        )
    }

    /// Evaluate recovery over the calibration and reporting grids.
    pub fn evaluate(&self) -> Result<TrackingEvaluation> {
        let calibration = compute_tracking_metrics(
            &self.ground_truth,
            &self.predictions,
            &self.config.calibration_thresholds,
            self.config.mode,
            &self.overlap,
        )?;
        let reporting = compute_tracking_metrics(
            &self.ground_truth,
            &self.predictions,
            &self.config.iou_thresholds,
            self.config.mode,
            &self.overlap,
        )?;

        Ok(TrackingEvaluation { calibration, reporting })
    }

    /// Evaluate and label the reported metrics.
    ///
    /// # Returns
    /// (label, value) pairs: the mean over the reporting grid first (unless
    /// `ignore_iou_averaging`), then each threshold in `ious_to_report` in
    /// grid order.
    pub fn get_metrics(&self) -> Result<LabeledMetrics> {
        let evaluation = self.evaluate()?;
        let metric_name = self.metric_name();
        let mut metrics = LabeledMetrics::new();

        if !self.config.ignore_iou_averaging {
            let grid = &evaluation.reporting.thresholds;
            if let (Some(first), Some(last)) = (grid.first(), grid.last()) {
                let avg_suffix = format!("@ IoU={:.2}:{:.2}", first, last);
                let label = format_metric_label(&metric_name, &avg_suffix);
                metrics.push((label, evaluation.average()));
            }
        }

        for (iou_thr, recovery) in evaluation.reporting.iter() {
            if !self.config.ious_to_report.iter().any(|&t| same_threshold(t, iou_thr)) {
                continue;
            }
            let suffix = format!("@ IoU={:.2}", iou_thr);
            metrics.push((format_metric_label(&metric_name, &suffix), recovery));
        }

        debug!("{}: {} labeled metrics", metric_name, metrics.len());
        Ok(metrics)
    }
}
