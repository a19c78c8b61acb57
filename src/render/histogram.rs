//! Histogram with a Gaussian density overlay for the wpm column.

use std::f64::consts::PI;

use super::svg::{Anchor, SvgDocument, TextStyle};
use crate::analysis::stats::{mean, quantile_sorted, sample_std};
use crate::config::RateConfig;
use crate::defaults;
use crate::error::{EdaError, Result};

const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_TOP: f64 = 80.0;
const MARGIN_BOTTOM: f64 = 80.0;

const BAR_COLOR: &str = "#4c72b0";
const AXIS_COLOR: &str = "#262626";
const TICK_LENGTH: f64 = 6.0;
const TICK_FONT_SIZE: f64 = 14.0;
const LABEL_FONT_SIZE: f64 = 16.0;

/// Equal-width bins over the finite values of a column.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bin the finite values. `None` when there are none.
    ///
    /// The bin count is clamped to `1..=MAX_BINS`. The last bin is closed on
    /// the right so the maximum is counted.
    pub fn build(values: &[f64], bins: Option<usize>) -> Option<Self> {
        let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return None;
        }
        finite.sort_by(f64::total_cmp);

        let n_bins = bins
            .unwrap_or_else(|| auto_bin_count(&finite))
            .clamp(1, defaults::MAX_BINS);
        let (mut lo, mut hi) = (finite[0], finite[finite.len() - 1]);
        if hi <= lo {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / n_bins as f64;
        let mut edges: Vec<f64> = (0..=n_bins).map(|i| lo + width * i as f64).collect();
        edges[n_bins] = hi;

        let mut counts = vec![0u64; n_bins];
        for v in &finite {
            let idx = (((v - lo) / width) as usize).min(n_bins - 1);
            counts[idx] += 1;
        }

        Some(Self { edges, counts })
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    pub fn range(&self) -> (f64, f64) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Bin count from the wider of the Sturges and Freedman-Diaconis rules.
///
/// Expects ascending, finite values.
pub fn auto_bin_count(sorted: &[f64]) -> usize {
    let n = sorted.len();
    if n < 2 {
        return 1;
    }
    let range = sorted[n - 1] - sorted[0];
    if range <= 0.0 {
        return 1;
    }

    let sturges_width = range / ((n as f64).log2() + 1.0);
    let iqr = quantile_sorted(sorted, 0.75) - quantile_sorted(sorted, 0.25);
    let fd_width = 2.0 * iqr * (n as f64).powf(-1.0 / 3.0);

    let width = if fd_width > 0.0 {
        fd_width.min(sturges_width)
    } else {
        sturges_width
    };
    ((range / width).ceil() as usize).clamp(1, defaults::MAX_BINS)
}

/// Scott's rule: `std * n^(-1/5)`. `None` without spread.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let std = sample_std(values, mean(values))?;
    if !(std.is_finite() && std > 0.0) {
        return None;
    }
    Some(std * (values.len() as f64).powf(-0.2))
}

/// Gaussian kernel density of `values` on `points` evenly spaced x in `[lo, hi]`.
pub fn gaussian_kde(values: &[f64], lo: f64, hi: f64, points: usize) -> Option<Vec<(f64, f64)>> {
    if points < 2 {
        return None;
    }
    let bandwidth = scott_bandwidth(values)?;
    let norm = 1.0 / (values.len() as f64 * bandwidth * (2.0 * PI).sqrt());

    let curve = (0..points)
        .map(|i| {
            let x = lo + (hi - lo) * i as f64 / (points - 1) as f64;
            let density: f64 = values
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            (x, density * norm)
        })
        .collect();
    Some(curve)
}

/// Everything needed to draw the distribution figure.
#[derive(Debug, Clone)]
pub struct DistributionPlot {
    pub histogram: Histogram,
    /// Density in count units (`density * n * bin_width`).
    pub kde: Option<Vec<(f64, f64)>>,
    /// Values left out because they were NaN or infinite.
    pub excluded: usize,
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Bin the column and fit the density curve.
pub fn render_distribution(values: &[f64], config: &RateConfig) -> Result<DistributionPlot> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let histogram =
        Histogram::build(&finite, config.bins).ok_or_else(|| EdaError::EmptyColumn {
            column: "wpm".to_string(),
        })?;

    let kde = if config.kde {
        let (lo, hi) = histogram.range();
        let scale = finite.len() as f64 * histogram.bin_width();
        gaussian_kde(&finite, lo, hi, defaults::KDE_GRID_POINTS)
            .map(|curve| curve.into_iter().map(|(x, d)| (x, d * scale)).collect())
    } else {
        None
    };

    Ok(DistributionPlot {
        histogram,
        kde,
        excluded: values.len() - finite.len(),
        title: config.title.clone(),
        width: config.width,
        height: config.height,
    })
}

impl DistributionPlot {
    /// Draw the figure. Only the left and bottom spines are drawn.
    pub fn to_svg(&self) -> String {
        let (width, height) = (self.width as f64, self.height as f64);
        let x0 = MARGIN_LEFT;
        let x1 = (width - MARGIN_RIGHT).max(x0 + 1.0);
        let y0 = MARGIN_TOP;
        let y1 = (height - MARGIN_BOTTOM).max(y0 + 1.0);

        let (lo, hi) = self.histogram.range();
        let kde_max = self
            .kde
            .iter()
            .flatten()
            .map(|(_, y)| *y)
            .fold(0.0_f64, f64::max);
        let y_max = (self.histogram.max_count() as f64).max(kde_max);
        let y_step = nice_step(y_max, 6);
        let y_top = ((y_max / y_step).ceil() * y_step).max(y_step);

        let sx = |x: f64| x0 + (x - lo) / (hi - lo) * (x1 - x0);
        let sy = |y: f64| y1 - y / y_top * (y1 - y0);

        let mut doc = SvgDocument::new(self.width, self.height, "white");

        for (i, &count) in self.histogram.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let left = sx(self.histogram.edges[i]);
            let right = sx(self.histogram.edges[i + 1]);
            let top = sy(count as f64);
            doc.rect(
                left,
                top,
                (right - left).max(0.5),
                y1 - top,
                BAR_COLOR,
                Some("white"),
                0.6,
            );
        }

        if let Some(curve) = &self.kde {
            let points: Vec<(f64, f64)> = curve.iter().map(|&(x, y)| (sx(x), sy(y))).collect();
            doc.polyline(&points, BAR_COLOR, 2.0);
        }

        // Spines
        doc.line(x0, y0, x0, y1, AXIS_COLOR, 1.25);
        doc.line(x0, y1, x1, y1, AXIS_COLOR, 1.25);

        let tick_style = TextStyle {
            size: TICK_FONT_SIZE,
            anchor: Anchor::Middle,
            fill: AXIS_COLOR,
            ..TextStyle::default()
        };
        let x_step = nice_step(hi - lo, 8);
        for x in ticks(lo, hi, x_step) {
            let px = sx(x);
            doc.line(px, y1, px, y1 + TICK_LENGTH, AXIS_COLOR, 1.0);
            doc.text(
                px,
                y1 + TICK_LENGTH + TICK_FONT_SIZE + 2.0,
                &format_tick(x, x_step),
                &tick_style,
            );
        }

        let y_tick_style = TextStyle {
            anchor: Anchor::End,
            ..tick_style.clone()
        };
        for y in ticks(0.0, y_top, y_step) {
            let py = sy(y);
            doc.line(x0 - TICK_LENGTH, py, x0, py, AXIS_COLOR, 1.0);
            doc.text(
                x0 - TICK_LENGTH - 4.0,
                py + TICK_FONT_SIZE / 3.0,
                &format_tick(y, y_step),
                &y_tick_style,
            );
        }

        let label_style = TextStyle {
            size: LABEL_FONT_SIZE,
            anchor: Anchor::Middle,
            fill: AXIS_COLOR,
            ..TextStyle::default()
        };
        doc.text((x0 + x1) / 2.0, height - 25.0, "wpm", &label_style);
        doc.text(
            25.0,
            (y0 + y1) / 2.0,
            "Count",
            &TextStyle {
                rotate: Some(-90.0),
                ..label_style.clone()
            },
        );

        doc.text(
            width / 2.0,
            MARGIN_TOP / 2.0,
            &self.title,
            &TextStyle {
                size: defaults::PLOT_TITLE_FONT_SIZE as f64,
                anchor: Anchor::Middle,
                fill: AXIS_COLOR,
                ..TextStyle::default()
            },
        );

        doc.finish()
    }
}

/// 1, 2, 2.5 or 5 times a power of ten, giving about `target` intervals.
fn nice_step(range: f64, target: usize) -> f64 {
    if !(range.is_finite() && range > 0.0) {
        return 1.0;
    }
    let raw = range / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 2.5 {
        2.5
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Multiples of `step` inside `[lo, hi]`.
fn ticks(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    let start = (lo / step).ceil();
    let end = (hi / step + 1e-9).floor();
    if end < start {
        return Vec::new();
    }
    (0..=(end - start) as usize)
        .map(|k| (start + k as f64) * step)
        .collect()
}

fn format_tick(value: f64, step: f64) -> String {
    let decimals = (0..=6)
        .find(|d| {
            let scaled = step * 10f64.powi(*d);
            (scaled - scaled.round()).abs() < 1e-6
        })
        .unwrap_or(6) as usize;
    // Avoid printing "-0".
    let value = if value.abs() < step * 1e-9 { 0.0 } else { value };
    format!("{:.*}", decimals, value)
}
