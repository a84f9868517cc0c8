//! Chart assembly.
//!
//! A [`ChartBuilder`] accumulates curves and chart text, then produces a
//! [`Chart`] that a [`ChartRenderer`] turns into an image file.

use crate::error::Result;
use crate::models::Curve;
use std::path::Path;

/// Default chart title.
pub const DEFAULT_TITLE: &str = "Comparison of Solve Times Across Algorithms";
/// Default x axis label.
pub const DEFAULT_X_LABEL: &str = "n (number of matrices)";
/// Default y axis label.
pub const DEFAULT_Y_LABEL: &str = "Average Time (seconds)";
/// Default chart width in pixels.
pub const DEFAULT_WIDTH: u32 = 800;
/// Default chart height in pixels.
pub const DEFAULT_HEIGHT: u32 = 600;

/// A finished chart description, ready to render.
#[derive(Debug, Clone)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    /// Logarithmic y axis.
    pub log_y: bool,
    /// Whether grid lines are drawn.
    pub grid: bool,
    /// Curves in legend order.
    pub curves: Vec<Curve>,
}

/// Builder accumulating curves before a single render step.
#[derive(Debug, Clone)]
pub struct ChartBuilder {
    chart: Chart,
}

impl Default for ChartBuilder {
    fn default() -> Self {
        Self {
            chart: Chart {
                title: DEFAULT_TITLE.to_string(),
                x_label: DEFAULT_X_LABEL.to_string(),
                y_label: DEFAULT_Y_LABEL.to_string(),
                width: DEFAULT_WIDTH,
                height: DEFAULT_HEIGHT,
                log_y: false,
                grid: true,
                curves: Vec::new(),
            },
        }
    }
}

impl ChartBuilder {
    /// Create a builder with the default title, labels and size.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.chart.title = title.into();
        self
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.chart.x_label = label.into();
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.chart.y_label = label.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.chart.width = width;
        self.chart.height = height;
        self
    }

    pub fn log_y(mut self, log_y: bool) -> Self {
        self.chart.log_y = log_y;
        self
    }

    pub fn grid(mut self, grid: bool) -> Self {
        self.chart.grid = grid;
        self
    }

    /// Append a curve. Curves keep the order they were added in.
    pub fn add_curve(&mut self, curve: Curve) {
        self.chart.curves.push(curve);
    }

    /// Append several curves in order.
    pub fn add_curves(&mut self, curves: impl IntoIterator<Item = Curve>) {
        for curve in curves {
            self.add_curve(curve);
        }
    }

    /// Number of curves added so far.
    pub fn curve_count(&self) -> usize {
        self.chart.curves.len()
    }

    /// Finish building.
    pub fn build(self) -> Chart {
        self.chart
    }
}

/// Something that can draw a chart and persist it as an image.
pub trait ChartRenderer {
    /// File extension of the images this renderer produces.
    fn extension(&self) -> &'static str;

    /// Render `chart` and write the image to `path`.
    fn render_to(&self, chart: &Chart, path: &Path) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;

    fn curve(label: &str) -> Curve {
        Curve {
            label: label.to_string(),
            source: format!("{}.txt", label),
            points: vec![Point {
                size: 1,
                mean_time: 1.0,
                samples: 1,
            }],
        }
    }

    #[test]
    fn test_builder_defaults() {
        let chart = ChartBuilder::new().build();
        assert_eq!(chart.title, DEFAULT_TITLE);
        assert_eq!(chart.x_label, DEFAULT_X_LABEL);
        assert_eq!(chart.y_label, DEFAULT_Y_LABEL);
        assert!(chart.grid);
        assert!(!chart.log_y);
        assert!(chart.curves.is_empty());
    }

    #[test]
    fn test_builder_keeps_curve_order() {
        let mut builder = ChartBuilder::new().title("Custom").size(640, 480);
        builder.add_curve(curve("b"));
        builder.add_curves(vec![curve("a"), curve("c")]);
        assert_eq!(builder.curve_count(), 3);

        let chart = builder.build();
        let labels: Vec<&str> = chart.curves.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a", "c"]);
        assert_eq!(chart.title, "Custom");
        assert_eq!((chart.width, chart.height), (640, 480));
    }
}
