//! Utility functions for track-recovery.

use crate::{Error, Result};

/// Absolute tolerance used when comparing IoU thresholds.
pub const EPS: f64 = 1e-10;

/// `num` evenly spaced values over the closed interval [start, stop].
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Check whether two thresholds are the same grid point.
pub fn same_threshold(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

/// Validate an IoU threshold grid: non-empty, every value in (0, 1].
pub fn validate_thresholds(thresholds: &[f64]) -> Result<()> {
    if thresholds.is_empty() {
        return Err(Error::InvalidConfig("IoU threshold grid is empty".to_string()));
    }

    if let Some(&bad) = thresholds.iter().find(|&&t| !(t > 0.0 && t <= 1.0)) {
        return Err(Error::InvalidConfig(format!(
            "IoU threshold {} is outside (0, 1]",
            bad
        )));
    }

    Ok(())
}

/// Label a metric with the `"<metric-name> <suffix>"` template.
pub fn format_metric_label(metric_name: &str, suffix: &str) -> String {
    format!("{} {}", metric_name, suffix)
}
