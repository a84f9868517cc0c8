//! Data models for benchmark aggregation.
//!
//! These are the values passed between the aggregator, the chart builder
//! and the JSON summary writer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One parsed `(size, time)` observation from a source line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Problem size (`n`).
    pub size: i64,
    /// Measured time for that instance.
    pub time: f64,
}

/// An averaged data point of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Problem size (`n`).
    pub size: i64,
    /// Arithmetic mean of all times recorded for this size.
    pub mean_time: f64,
    /// Number of samples that went into the mean.
    pub samples: usize,
}

impl Point {
    /// Whether the point can be placed on a chart.
    pub fn is_drawable(&self) -> bool {
        self.mean_time.is_finite()
    }
}

/// The averaged series derived from one source.
///
/// Points are ordered by strictly ascending size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Legend label derived from the source name.
    pub label: String,
    /// Source the curve was read from.
    pub source: String,
    /// Averaged points, ascending by size.
    pub points: Vec<Point>,
}

impl Curve {
    /// Total number of samples behind this curve.
    pub fn sample_count(&self) -> usize {
        self.points.iter().map(|p| p.samples).sum()
    }

    /// `(size, mean_time)` pairs in order.
    pub fn pairs(&self) -> Vec<(i64, f64)> {
        self.points.iter().map(|p| (p.size, p.mean_time)).collect()
    }
}

/// Why a source contributed no curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The source had no valid lines.
    NoValidData,
    /// The source could not be read and `--skip-unreadable` was set.
    Unreadable,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoValidData => write!(f, "no valid data"),
            SkipReason::Unreadable => write!(f, "unreadable"),
        }
    }
}

/// A source that was skipped during collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedSource {
    pub source: String,
    pub reason: SkipReason,
    /// Error detail for unreadable sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Summary of a complete run, written by `--summary-json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// When the summary was generated.
    pub generated_at: DateTime<Utc>,
    /// Chart title.
    pub title: String,
    /// Path of the chart image.
    pub chart_path: String,
    /// Plotted curves in input order.
    pub curves: Vec<Curve>,
    /// Sources that produced no curve.
    pub skipped: Vec<SkippedSource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_curve() -> Curve {
        Curve {
            label: "results_dp".to_string(),
            source: "results_dp.txt".to_string(),
            points: vec![
                Point {
                    size: 2,
                    mean_time: 0.1,
                    samples: 1,
                },
                Point {
                    size: 5,
                    mean_time: 0.3,
                    samples: 2,
                },
            ],
        }
    }

    #[test]
    fn test_curve_sample_count() {
        assert_eq!(make_curve().sample_count(), 3);
    }

    #[test]
    fn test_curve_pairs() {
        assert_eq!(make_curve().pairs(), vec![(2, 0.1), (5, 0.3)]);
    }

    #[test]
    fn test_point_is_drawable() {
        let mut point = make_curve().points[0];
        assert!(point.is_drawable());
        point.mean_time = f64::NAN;
        assert!(!point.is_drawable());
        point.mean_time = f64::INFINITY;
        assert!(!point.is_drawable());
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::NoValidData.to_string(), "no valid data");
        assert_eq!(SkipReason::Unreadable.to_string(), "unreadable");
    }

    #[test]
    fn test_skipped_source_serialization() {
        let skipped = SkippedSource {
            source: "empty.txt".to_string(),
            reason: SkipReason::NoValidData,
            detail: None,
        };
        let json = serde_json::to_string(&skipped).unwrap();
        assert!(json.contains("\"no_valid_data\""));
        assert!(!json.contains("detail"));
    }
}
