//! Descriptive statistics over a numeric column.

use serde::Serialize;
use std::fmt::Write as _;

/// count / mean / std / min / quartiles / max of a column.
///
/// NaN values are left out of every figure, including `count`. Infinite
/// values take part and propagate into `mean` and `std`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

/// Summarize `values`, or `None` when there is nothing to summarize.
pub fn describe(values: &[f64]) -> Option<Summary> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let mean = mean(&sorted);
    Some(Summary {
        count,
        mean,
        std: sample_std(&sorted, mean),
        min: sorted[0],
        p25: quantile_sorted(&sorted, 0.25),
        p50: quantile_sorted(&sorted, 0.50),
        p75: quantile_sorted(&sorted, 0.75),
        max: sorted[count - 1],
    })
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn sample_std(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Quantile of ascending `sorted` with linear interpolation between ranks.
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let (a, b) = (sorted[lo], sorted[hi]);
    let t = pos - lo as f64;
    // Also covers equal infinities, where b - a would be NaN.
    if lo == hi || a == b {
        return a;
    }
    match (a.is_infinite(), b.is_infinite()) {
        (true, false) => a,
        (false, true) => b,
        (true, true) => {
            if t < 0.5 {
                a
            } else {
                b
            }
        }
        (false, false) => a + (b - a) * t,
    }
}

impl Summary {
    /// Text table with one row per statistic, headed by `column`.
    pub fn render_table(&self, column: &str) -> String {
        let fmt = |v: f64| format!("{:.6}", v);
        let rows = [
            ("count", self.count.to_string()),
            ("mean", fmt(self.mean)),
            ("std", self.std.map(fmt).unwrap_or_else(|| "NaN".to_string())),
            ("min", fmt(self.min)),
            ("25%", fmt(self.p25)),
            ("50%", fmt(self.p50)),
            ("75%", fmt(self.p75)),
            ("max", fmt(self.max)),
        ];
        let width = rows
            .iter()
            .map(|(_, v)| v.len())
            .max()
            .unwrap_or(0)
            .max(column.len());

        let mut out = String::new();
        let _ = writeln!(out, "{:<5}  {:>width$}", "", column);
        for (label, value) in rows {
            let _ = writeln!(out, "{:<5}  {:>width$}", label, value);
        }
        out
    }
}
