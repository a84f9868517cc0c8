//! SVG line chart renderer.

use super::builder::{Chart, ChartRenderer};
use crate::error::{AlgoPlotError, Result};
use crate::models::Curve;
use std::fmt::Write;
use std::path::Path;
use tracing::debug;

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 170.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const MARKER_RADIUS: f64 = 3.5;
const LEGEND_ROW_H: f64 = 20.0;
/// Upper bound on tick marks per axis.
const MAX_TICKS: usize = 24;

/// Line colours, cycled per curve.
const PALETTE: [&str; 10] = [
    "1F77B4", "FF7F0E", "2CA02C", "D62728", "9467BD", "8C564B", "E377C2", "7F7F7F", "BCBD22",
    "17BECF",
];

/// Renders charts as standalone SVG documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgRenderer;

impl ChartRenderer for SvgRenderer {
    fn extension(&self) -> &'static str {
        "svg"
    }

    fn render_to(&self, chart: &Chart, path: &Path) -> Result<()> {
        let svg = render_svg(chart)?;
        std::fs::write(path, svg)?;
        debug!("Wrote {} curves to {}", chart.curves.len(), path.display());
        Ok(())
    }
}

/// Render a chart to an SVG string.
pub fn render_svg(chart: &Chart) -> Result<String> {
    let mut out = String::new();
    write_svg(&mut out, chart).map_err(|e| AlgoPlotError::Render(e.to_string()))?;
    Ok(out)
}

/// One chart axis mapping data values onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Axis {
    lo: f64,
    hi: f64,
    log: bool,
}

impl Axis {
    fn linear(values: impl Iterator<Item = f64>) -> Self {
        let (min, max) = bounds(values);
        if !min.is_finite() || !max.is_finite() {
            return Self {
                lo: 0.0,
                hi: 1.0,
                log: false,
            };
        }

        // Halved operands keep the span finite across the whole f64 range.
        let pad = if max > min {
            (max / 2.0 - min / 2.0) * 0.1
        } else if min == 0.0 {
            1.0
        } else {
            min.abs() * 0.1
        };

        let lo = (min - pad).max(f64::MIN);
        let hi = (max + pad).min(f64::MAX);
        if hi > lo {
            return Self { lo, hi, log: false };
        }

        // Padding vanished (subnormal values); fall back to a unit margin.
        let (lo, hi) = (min - 1.0, max + 1.0);
        if hi > lo {
            Self { lo, hi, log: false }
        } else {
            Self {
                lo: 0.0,
                hi: 1.0,
                log: false,
            }
        }
    }

    fn logarithmic(values: impl Iterator<Item = f64>) -> Self {
        let (min, max) = bounds(values.filter(|v| *v > 0.0));
        if !min.is_finite() || !max.is_finite() {
            return Self {
                lo: 0.1,
                hi: 10.0,
                log: true,
            };
        }

        let (lo_exp, hi_exp) = (min.log10(), max.log10());
        let pad = if hi_exp > lo_exp {
            (hi_exp - lo_exp) * 0.05
        } else {
            0.3
        };

        let smallest = f64::from_bits(1);
        let lo = 10f64.powf(lo_exp - pad).clamp(smallest, f64::MAX);
        let hi = 10f64.powf(hi_exp + pad).clamp(smallest, f64::MAX);
        if hi > lo {
            Self { lo, hi, log: true }
        } else {
            Self {
                lo: 0.1,
                hi: 10.0,
                log: true,
            }
        }
    }

    /// Whether a value can be placed on this axis.
    fn accepts(&self, v: f64) -> bool {
        v.is_finite() && (!self.log || v > 0.0)
    }

    fn fraction(&self, v: f64) -> f64 {
        let f = if self.log {
            (v.log10() - self.lo.log10()) / (self.hi.log10() - self.lo.log10())
        } else {
            (v / 2.0 - self.lo / 2.0) / (self.hi / 2.0 - self.lo / 2.0)
        };
        if f.is_finite() {
            f
        } else {
            0.0
        }
    }

    fn ticks(&self) -> Vec<f64> {
        if self.log {
            log_ticks(self.lo, self.hi)
        } else {
            linear_ticks(self.lo, self.hi)
        }
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

/// Round a raw tick spacing to 1, 2 or 5 times a power of ten.
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn linear_ticks(lo: f64, hi: f64) -> Vec<f64> {
    if !(lo.is_finite() && hi.is_finite() && hi > lo) {
        return Vec::new();
    }
    let step = nice_step(hi / 6.0 - lo / 6.0);
    if !(step.is_finite() && step > 0.0) {
        return Vec::new();
    }
    let first = (lo / step).ceil();
    if !first.is_finite() {
        return Vec::new();
    }

    let mut ticks = Vec::new();
    for i in 0..MAX_TICKS {
        let t = (first + i as f64) * step;
        if !t.is_finite() || t > hi + step * 1e-9 {
            break;
        }
        // Avoid "-0" labels.
        ticks.push(if t.abs() < step * 1e-9 { 0.0 } else { t });
    }
    ticks
}

fn log_ticks(lo: f64, hi: f64) -> Vec<f64> {
    if !(lo > 0.0 && hi.is_finite() && hi > lo) {
        return Vec::new();
    }
    let decades = hi.log10() - lo.log10();
    let mantissas: &[f64] = if decades > 3.0 { &[1.0] } else { &[1.0, 2.0, 5.0] };

    let first = lo.log10().floor() as i32;
    let last = hi.log10().ceil() as i32;
    let stride = ((last - first) as usize / MAX_TICKS + 1);

    let mut ticks = Vec::new();
    for p in (first..=last).step_by(stride) {
        let base = 10f64.powi(p);
        if !base.is_finite() {
            break;
        }
        for &m in mantissas {
            let v = m * base;
            if v.is_finite() && v >= lo && v <= hi {
                ticks.push(v);
            }
        }
        if ticks.len() >= MAX_TICKS {
            break;
        }
    }
    ticks
}

/// Format a tick value compactly.
fn fmt_tick(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let abs = v.abs();
    if !(1e-3..1e6).contains(&abs) {
        return format!("{:e}", v);
    }
    let s = format!("{:.6}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Escape text for use inside SVG elements and attributes.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Split a curve into runs of drawable points, as pixel coordinates.
fn segments(
    curve: &Curve,
    x: &Axis,
    y: &Axis,
    map: impl Fn(f64, f64) -> (f64, f64),
) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for point in &curve.points {
        let px = point.size as f64;
        if point.is_drawable() && x.accepts(px) && y.accepts(point.mean_time) {
            current.push(map(px, point.mean_time));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn write_svg(w: &mut String, chart: &Chart) -> std::fmt::Result {
    let width = chart.width as f64;
    let height = chart.height as f64;
    let plot_w = (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
    let plot_h = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);
    let (left, top) = (MARGIN_LEFT, MARGIN_TOP);
    let (right, bottom) = (left + plot_w, top + plot_h);

    let drawable = || {
        chart
            .curves
            .iter()
            .flat_map(|c| c.points.iter())
            .filter(|p| p.is_drawable())
    };
    let x_axis = Axis::linear(drawable().map(|p| p.size as f64));
    let y_axis = if chart.log_y {
        Axis::logarithmic(drawable().map(|p| p.mean_time))
    } else {
        Axis::linear(drawable().map(|p| p.mean_time))
    };

    let to_px = |xv: f64, yv: f64| -> (f64, f64) {
        (
            left + x_axis.fraction(xv) * plot_w,
            bottom - y_axis.fraction(yv) * plot_h,
        )
    };

    writeln!(
        w,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" font-family=\"Arial,Helvetica,sans-serif\">"
    )?;
    writeln!(w, "<rect width=\"{width}\" height=\"{height}\" fill=\"white\"/>")?;

    // title
    writeln!(
        w,
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"16\" fill=\"#222\">{}</text>",
        left + plot_w / 2.0,
        top - 20.0,
        escape(&chart.title)
    )?;

    // grid + tick labels
    for t in x_axis.ticks() {
        let (tx, _) = to_px(t, y_axis.lo);
        if chart.grid {
            writeln!(
                w,
                "<line x1=\"{tx:.1}\" y1=\"{top:.1}\" x2=\"{tx:.1}\" y2=\"{bottom:.1}\" stroke=\"#DDD\" stroke-width=\"1\"/>"
            )?;
        }
        writeln!(
            w,
            "<text x=\"{tx:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\" fill=\"#444\">{}</text>",
            bottom + 16.0,
            fmt_tick(t)
        )?;
    }
    for t in y_axis.ticks() {
        let (_, ty) = to_px(x_axis.lo, t);
        if chart.grid {
            writeln!(
                w,
                "<line x1=\"{left:.1}\" y1=\"{ty:.1}\" x2=\"{right:.1}\" y2=\"{ty:.1}\" stroke=\"#DDD\" stroke-width=\"1\"/>"
            )?;
        }
        writeln!(
            w,
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\" fill=\"#444\">{}</text>",
            left - 6.0,
            ty + 4.0,
            fmt_tick(t)
        )?;
    }

    // plot frame
    writeln!(
        w,
        "<rect x=\"{left:.1}\" y=\"{top:.1}\" width=\"{plot_w:.1}\" height=\"{plot_h:.1}\" fill=\"none\" stroke=\"#444\" stroke-width=\"1\"/>"
    )?;

    // axis labels
    writeln!(
        w,
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"13\" fill=\"#222\">{}</text>",
        left + plot_w / 2.0,
        bottom + 42.0,
        escape(&chart.x_label)
    )?;
    let (ylx, yly) = (left - 58.0, top + plot_h / 2.0);
    writeln!(
        w,
        "<text x=\"{ylx:.1}\" y=\"{yly:.1}\" text-anchor=\"middle\" font-size=\"13\" fill=\"#222\" transform=\"rotate(-90 {ylx:.1} {yly:.1})\">{}</text>",
        escape(&chart.y_label)
    )?;

    // curves
    for (idx, curve) in chart.curves.iter().enumerate() {
        let colour = PALETTE[idx % PALETTE.len()];
        writeln!(w, "<g class=\"curve\" data-label=\"{}\">", escape(&curve.label))?;

        for run in segments(curve, &x_axis, &y_axis, &to_px) {
            let coords: Vec<String> = run.iter().map(|(x, y)| format!("{x:.1},{y:.1}")).collect();
            writeln!(
                w,
                "<polyline points=\"{}\" fill=\"none\" stroke=\"#{colour}\" stroke-width=\"1.8\"/>",
                coords.join(" ")
            )?;
            for (x, y) in &run {
                writeln!(
                    w,
                    "<circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"{MARKER_RADIUS}\" fill=\"#{colour}\"/>"
                )?;
            }
        }

        writeln!(w, "</g>")?;
    }

    // legend
    if !chart.curves.is_empty() {
        let lx = right + 14.0;
        let legend_h = chart.curves.len() as f64 * LEGEND_ROW_H + 10.0;
        writeln!(
            w,
            "<rect x=\"{lx:.1}\" y=\"{top:.1}\" width=\"{:.1}\" height=\"{legend_h:.1}\" fill=\"white\" stroke=\"#CCC\" stroke-width=\"1\"/>",
            MARGIN_RIGHT - 24.0
        )?;
        for (idx, curve) in chart.curves.iter().enumerate() {
            let colour = PALETTE[idx % PALETTE.len()];
            let row_y = top + 15.0 + idx as f64 * LEGEND_ROW_H;
            writeln!(
                w,
                "<line x1=\"{:.1}\" y1=\"{row_y:.1}\" x2=\"{:.1}\" y2=\"{row_y:.1}\" stroke=\"#{colour}\" stroke-width=\"1.8\"/>",
                lx + 8.0,
                lx + 30.0
            )?;
            writeln!(
                w,
                "<circle cx=\"{:.1}\" cy=\"{row_y:.1}\" r=\"{MARKER_RADIUS}\" fill=\"#{colour}\"/>",
                lx + 19.0
            )?;
            writeln!(
                w,
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" fill=\"#222\">{}</text>",
                lx + 36.0,
                row_y + 4.0,
                escape(&curve.label)
            )?;
        }
    }

    writeln!(w, "</svg>")
}
