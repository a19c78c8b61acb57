//! Plain-text views for stdout.

use std::fmt::Write as _;

use super::histogram::Histogram;
use crate::analysis::WordEntry;

const BAR_CHAR: char = '█';

/// Horizontal bar chart of a histogram, longest bar `bar_width` characters.
pub fn render_text_histogram(histogram: &Histogram, bar_width: usize) -> String {
    let max = histogram.max_count().max(1);
    let labels: Vec<String> = histogram
        .edges
        .windows(2)
        .map(|w| format!("[{:.1}, {:.1})", w[0], w[1]))
        .collect();
    let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, &count) in labels.iter().zip(&histogram.counts) {
        let len = (count as f64 / max as f64 * bar_width as f64).round() as usize;
        let bar: String = std::iter::repeat_n(BAR_CHAR, len).collect();
        let _ = writeln!(out, "{:<label_width$}  {} {}", label, bar, count);
    }
    out
}

/// Ranked word listing: rank, word, count, frequency.
pub fn render_word_table(entries: &[WordEntry]) -> String {
    let word_width = entries
        .iter()
        .map(|e| e.word.chars().count())
        .max()
        .unwrap_or(0)
        .max("word".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<word_width$}  {:>10}  {:>10}",
        "#", "word", "count", "frequency"
    );
    for (i, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:<word_width$}  {:>10}  {:>10.6}",
            i + 1,
            entry.word,
            entry.count,
            entry.frequency
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::WordCounts;

    #[test]
    fn histogram_bars_scale_to_width() {
        let hist = Histogram {
            edges: vec![0.0, 1.0, 2.0],
            counts: vec![4, 2],
        };
        let text = render_text_histogram(&hist, 10);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].matches(BAR_CHAR).count(), 10);
        assert_eq!(lines[1].matches(BAR_CHAR).count(), 5);
        assert!(lines[0].starts_with("[0.0, 1.0)"));
        assert!(lines[1].ends_with(" 2"));
    }

    #[test]
    fn empty_bins_have_no_bar() {
        let hist = Histogram {
            edges: vec![0.0, 1.0, 2.0],
            counts: vec![0, 3],
        };
        let text = render_text_histogram(&hist, 8);
        assert_eq!(text.lines().next().unwrap().matches(BAR_CHAR).count(), 0);
    }

    #[test]
    fn word_table_lists_ranked_entries() {
        let entries = WordCounts::accumulate(["a a b"]).top(2);
        let text = render_word_table(&entries);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("frequency"));
        assert!(lines[1].contains(" a "));
        assert!(lines[1].contains("0.666667"));
        assert!(lines[2].trim_start().starts_with('2'));
    }
}
