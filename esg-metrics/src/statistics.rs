//! Descriptive statistics over small sample arrays (a few dozen points at most).

use serde::Serialize;

/// Samples further than this many standard deviations from the mean are anomalous.
pub const ANOMALY_Z_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticalSummary {
    pub mean: f64,
    /// Upper-middle element of the sorted samples for even-length input
    pub median: f64,
    /// Population standard deviation (divides by N)
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Mean, median, population standard deviation, min and max of `values`.
///
/// The median of an even-length sample is the upper of the two middle
/// elements, not their average. An empty sample yields all zeros.
pub fn calculate_stats(values: &[f64]) -> StatisticalSummary {
    if values.is_empty() {
        return StatisticalSummary::default();
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let median = sorted[sorted.len() / 2];

    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    StatisticalSummary {
        mean,
        median,
        std_dev: variance.sqrt(),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
    }
}

/// `(value - mean) / std_dev`, or 0 when the samples have no spread.
pub fn z_score(value: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev > 0.0 {
        (value - mean) / std_dev
    } else {
        0.0
    }
}

pub fn is_anomalous(z: f64) -> bool {
    z.abs() > ANOMALY_Z_THRESHOLD
}

/// z-score of every value against the sample's own mean and deviation,
/// paired with its anomaly flag.
pub fn flag_anomalies(values: &[f64]) -> Vec<(f64, bool)> {
    let stats = calculate_stats(values);
    values
        .iter()
        .map(|v| {
            let z = z_score(*v, stats.mean, stats.std_dev);
            (z, is_anomalous(z))
        })
        .collect()
}
