//! Per-source aggregation of benchmark result lines.
//!
//! Each line has the form `n time cost [remainder]`. Times are grouped by
//! exact size and averaged, producing one [`Curve`] per source.

use crate::error::{AlgoPlotError, Result};
use crate::models::{Curve, Point, Sample};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, trace};

/// Minimum number of fields a result line must carry (`size time cost`).
const MIN_FIELDS: usize = 3;

/// Parse one result line into a sample.
///
/// Returns `None` for blank lines, lines with fewer than three fields, and
/// lines whose size or time does not parse. The cost field and anything
/// after it are ignored.
pub fn parse_line(line: &str) -> Option<Sample> {
    let fields: Vec<&str> = line.split_whitespace().take(MIN_FIELDS).collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }

    let size = fields[0].parse::<i64>().ok()?;
    let time = fields[1].parse::<f64>().ok()?;

    Some(Sample { size, time })
}

/// Derive the legend label for a source name.
///
/// Drops directory components and one trailing extension:
/// `"/tmp/foo.bar.csv"` becomes `"foo.bar"`. Leading dots never start an
/// extension, so `".results"` and `".."` are kept whole, and a name ending
/// in a separator has an empty label.
pub fn series_label(name: &str) -> String {
    let base = name
        .rsplit(|c: char| c == '/' || c == std::path::MAIN_SEPARATOR)
        .next()
        .unwrap_or(name);

    match base.rfind('.') {
        Some(dot) if base[..dot].chars().any(|c| c != '.') => base[..dot].to_string(),
        _ => base.to_string(),
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    sum: f64,
    count: usize,
}

/// Accumulates samples for a single source.
#[derive(Debug, Default)]
pub struct Aggregator {
    buckets: BTreeMap<i64, Bucket>,
    lines_seen: usize,
    lines_skipped: usize,
}

impl Aggregator {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw line. Blank lines are not counted as skipped.
    pub fn push_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        self.lines_seen += 1;

        match parse_line(line) {
            Some(sample) => self.push(sample),
            None => {
                trace!("Skipping malformed line: {:?}", line);
                self.lines_skipped += 1;
            }
        }
    }

    /// Record a parsed sample.
    pub fn push(&mut self, sample: Sample) {
        let bucket = self.buckets.entry(sample.size).or_default();
        bucket.sum += sample.time;
        bucket.count += 1;
    }

    /// Number of non-blank lines that could not be parsed.
    pub fn lines_skipped(&self) -> usize {
        self.lines_skipped
    }

    /// Whether no valid sample has been recorded.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Produce the averaged curve, or `None` if no valid sample was seen.
    pub fn finish(self, source: &str) -> Option<Curve> {
        if self.is_empty() {
            return None;
        }

        let points = self
            .buckets
            .into_iter()
            .map(|(size, bucket)| Point {
                size,
                mean_time: bucket.sum / bucket.count as f64,
                samples: bucket.count,
            })
            .collect();

        Some(Curve {
            label: series_label(source),
            source: source.to_string(),
            points,
        })
    }
}

/// Aggregate every line of a reader into a curve named after `source`.
pub fn aggregate_reader<R: BufRead>(reader: R, source: &str) -> io::Result<Option<Curve>> {
    let mut aggregator = Aggregator::new();

    for line in reader.lines() {
        aggregator.push_line(&line?);
    }

    debug!(
        "{}: {} lines read, {} skipped",
        source,
        aggregator.lines_seen,
        aggregator.lines_skipped()
    );

    Ok(aggregator.finish(source))
}

/// Open and aggregate a source file.
///
/// The file handle lives only for the duration of this call.
pub fn aggregate_file(path: &Path) -> Result<Option<Curve>> {
    let source = path.to_string_lossy().to_string();
    let unreadable = |e: io::Error| AlgoPlotError::SourceUnreadable {
        path: path.to_path_buf(),
        source: e,
    };

    let file = File::open(path).map_err(unreadable)?;
    aggregate_reader(BufReader::new(file), &source).map_err(unreadable)
}
