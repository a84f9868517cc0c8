//! Collection of curves from all sources, in input order.

use super::aggregator::aggregate_file;
use crate::error::Result;
use crate::models::{Curve, SkipReason, SkippedSource};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Policy for sources that cannot be collected.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectOptions {
    /// Report and skip unreadable sources instead of aborting the run.
    pub skip_unreadable: bool,
}

/// Curves and skipped sources from one run.
#[derive(Debug, Default)]
pub struct Collection {
    pub curves: Vec<Curve>,
    pub skipped: Vec<SkippedSource>,
}

/// Aggregate each source in order.
///
/// Sources without valid data are reported on stdout and skipped. An
/// unreadable source aborts the run unless `skip_unreadable` is set.
pub fn collect_curves(sources: &[PathBuf], options: CollectOptions) -> Result<Collection> {
    let mut collection = Collection::default();

    for path in sources {
        let source = path.to_string_lossy().to_string();

        match aggregate_file(path) {
            Ok(Some(curve)) => {
                info!(
                    "{}: {} sizes from {} samples",
                    curve.label,
                    curve.points.len(),
                    curve.sample_count()
                );
                debug!("{}: {:?}", curve.label, curve.pairs());
                collection.curves.push(curve);
            }
            Ok(None) => {
                println!("No valid data found in {}, skipping.", source);
                collection.skipped.push(SkippedSource {
                    source,
                    reason: SkipReason::NoValidData,
                    detail: None,
                });
            }
            Err(e) if options.skip_unreadable && e.is_source_error() => {
                warn!("{}", e);
                println!("Could not read {}, skipping.", source);
                collection.skipped.push(SkippedSource {
                    source,
                    reason: SkipReason::Unreadable,
                    detail: Some(e.to_string()),
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_source(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_collect_preserves_input_order() {
        let dir = TempDir::new().unwrap();
        let b = write_source(&dir, "b.txt", "1 3.0 5 X\n");
        let a = write_source(&dir, "a.txt", "1 1.0 5 X\n2 2.0 6 Y\n");

        let collection = collect_curves(&[b, a], CollectOptions::default()).unwrap();
        let labels: Vec<&str> = collection.curves.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a"]);
    }

    #[test]
    fn test_collect_skips_empty_sources() {
        let dir = TempDir::new().unwrap();
        let empty = write_source(&dir, "empty.txt", "\nnot a result\n3 1.0\n");
        let good = write_source(&dir, "good.txt", "4 1.0 0\n");

        let collection = collect_curves(&[empty, good], CollectOptions::default()).unwrap();
        assert_eq!(collection.curves.len(), 1);
        assert_eq!(collection.curves[0].label, "good");
        assert_eq!(collection.skipped.len(), 1);
        assert_eq!(collection.skipped[0].reason, SkipReason::NoValidData);
    }

    #[test]
    fn test_collect_all_empty_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let empty = write_source(&dir, "empty.txt", "");

        let collection = collect_curves(&[empty], CollectOptions::default()).unwrap();
        assert!(collection.curves.is_empty());
        assert_eq!(collection.skipped.len(), 1);
    }

    #[test]
    fn test_collect_unreadable_is_fatal_by_default() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.txt");

        assert!(collect_curves(&[missing], CollectOptions::default()).is_err());
    }

    #[test]
    fn test_collect_unreadable_skipped_when_requested() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.txt");
        let good = write_source(&dir, "good.txt", "4 1.0 0\n");

        let options = CollectOptions {
            skip_unreadable: true,
        };
        let collection = collect_curves(&[missing, good], options).unwrap();
        assert_eq!(collection.curves.len(), 1);
        assert_eq!(collection.skipped[0].reason, SkipReason::Unreadable);
        assert!(collection.skipped[0].detail.is_some());
    }
}
