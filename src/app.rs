//! Pipeline composition: load the manifest once, then run the requested
//! stages and print their results.
//!
//! Load → speaking rate → distribution plot, and load → word frequency →
//! word cloud. Each stage runs exactly once and nothing flows backwards.

use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use crate::analysis::{FrequencyMap, RateTable, StopWords, Summary, WordCounts, WordEntry};
use crate::config::Config;
use crate::error::{EdaError, Result};
use crate::manifest::{ManifestTable, load_manifest};
use crate::output::Reporter;
use crate::render::terminal::{render_text_histogram, render_word_table};
use crate::render::{
    CloudLayout, DistributionPlot, layout_cloud, render_distribution, write_figure,
};

/// Width of the terminal histogram bars.
const TERMINAL_BAR_WIDTH: usize = 50;

/// How textual results are printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = EdaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(EdaError::ConfigInvalidValue {
                key: "format".to_string(),
                message: format!("expected 'table' or 'json', got '{}'", other),
            }),
        }
    }
}

/// Result of the speaking-rate stage.
#[derive(Debug, Clone)]
pub struct RateReport {
    pub rates: RateTable,
    pub summary: Option<Summary>,
    pub plot: DistributionPlot,
    pub plot_path: PathBuf,
}

#[derive(Serialize)]
struct RateJson<'a> {
    column: &'static str,
    records: usize,
    non_finite: usize,
    summary: Option<&'a Summary>,
}

/// Result of the word-frequency stage.
#[derive(Debug, Clone)]
pub struct WordsReport {
    pub counts: WordCounts,
    pub frequencies: FrequencyMap,
    pub layout: CloudLayout,
    pub cloud_path: PathBuf,
}

#[derive(Serialize)]
struct WordsJson<'a> {
    total_tokens: u64,
    distinct_words: usize,
    top: &'a [WordEntry],
}

/// Load the configured manifest.
pub fn load(config: &Config, reporter: &Reporter) -> Result<ManifestTable> {
    let start = Instant::now();
    reporter.status(&format!(
        "Loading manifest {}",
        config.manifest.path.display()
    ));
    let table = load_manifest(&config.manifest.path, config.manifest.duration_policy)?;
    reporter.detail(&format!(
        "{} records, {:.1} hours of audio",
        table.len(),
        table.total_duration() / 3600.0
    ));
    reporter.timing("load", start.elapsed());
    Ok(table)
}

/// Derive wordcount/wpm, summarize, and write the distribution plot.
pub fn rate_stage(
    table: &ManifestTable,
    config: &Config,
    reporter: &Reporter,
) -> Result<RateReport> {
    let start = Instant::now();
    let rates = RateTable::from_manifest(table);
    let summary = rates.summary();

    let non_finite = rates.non_finite_count();
    if non_finite > 0 {
        reporter.warn(&format!(
            "{} records have a non-finite wpm; they are left out of the plot",
            non_finite
        ));
    }

    let plot = render_distribution(&rates.wpm_column(), &config.rate)?;
    reporter.debug(&format!(
        "{} bins of width {:.3}, kde: {}",
        plot.histogram.bins(),
        plot.histogram.bin_width(),
        plot.kde.is_some()
    ));

    let plot_path = config.histogram_path();
    write_figure(&plot.to_svg(), &plot_path)?;
    reporter.written("wpm distribution", &plot_path);
    reporter.timing("speaking rate", start.elapsed());

    Ok(RateReport {
        rates,
        summary,
        plot,
        plot_path,
    })
}

/// Count words, normalize, and write the word cloud.
pub fn words_stage(
    table: &ManifestTable,
    config: &Config,
    reporter: &Reporter,
) -> Result<WordsReport> {
    let start = Instant::now();
    let counts = WordCounts::accumulate(table.texts());
    let frequencies = counts.frequencies();
    reporter.detail(&format!(
        "{} tokens, {} distinct words",
        counts.total_tokens(),
        counts.distinct()
    ));

    let stopwords = StopWords::from_config(&config.cloud);
    let layout = layout_cloud(&frequencies, &stopwords, &config.cloud);
    reporter.debug(&format!(
        "cloud: {} placed, {} dropped, {} stopwords filtered",
        layout.words.len(),
        layout.dropped,
        layout.filtered
    ));

    let cloud_path = config.cloud_path();
    write_figure(&layout.to_svg(), &cloud_path)?;
    reporter.written("word cloud", &cloud_path);
    reporter.timing("word frequency", start.elapsed());

    Ok(WordsReport {
        counts,
        frequencies,
        layout,
        cloud_path,
    })
}

/// Print the schema report and the first `head` rows.
pub fn run_info(config: &Config, head: usize, reporter: &Reporter) -> Result<()> {
    let table = load(config, reporter)?;
    print_info(&table, config, head);
    Ok(())
}

/// Speaking-rate stage with summary on stdout.
pub fn run_rate(
    config: &Config,
    format: OutputFormat,
    terminal: bool,
    reporter: &Reporter,
) -> Result<RateReport> {
    let table = load(config, reporter)?;
    let report = rate_stage(&table, config, reporter)?;
    print_rate(&report, format, terminal)?;
    Ok(report)
}

/// Word-frequency stage with the top words on stdout.
pub fn run_words(
    config: &Config,
    top: usize,
    format: OutputFormat,
    reporter: &Reporter,
) -> Result<WordsReport> {
    let table = load(config, reporter)?;
    let report = words_stage(&table, config, reporter)?;
    print_words(&report, top, format)?;
    Ok(report)
}

/// The whole analysis: schema, speaking rate, word frequency.
pub fn run_all(
    config: &Config,
    head: usize,
    top: usize,
    reporter: &Reporter,
) -> Result<(RateReport, WordsReport)> {
    let table = load(config, reporter)?;
    print_info(&table, config, head);
    println!();
    let rate = rate_stage(&table, config, reporter)?;
    print_rate(&rate, OutputFormat::Table, false)?;
    println!();
    let words = words_stage(&table, config, reporter)?;
    print_words(&words, top, OutputFormat::Table)?;
    Ok((rate, words))
}

fn print_info(table: &ManifestTable, config: &Config, head: usize) {
    print!(
        "{}",
        table
            .info()
            .render_info(&config.manifest.path.display().to_string())
    );
    if head > 0 && !table.is_empty() {
        println!();
        print!("{}", table.info().render_head(head));
    }
}

fn print_rate(report: &RateReport, format: OutputFormat, terminal: bool) -> Result<()> {
    match format {
        OutputFormat::Table => {
            match &report.summary {
                Some(summary) => print!("{}", summary.render_table("wpm")),
                None => println!("wpm: no values"),
            }
            if terminal {
                println!();
                print!(
                    "{}",
                    render_text_histogram(&report.plot.histogram, TERMINAL_BAR_WIDTH)
                );
            }
        }
        OutputFormat::Json => {
            let json = RateJson {
                column: "wpm",
                records: report.rates.len(),
                non_finite: report.rates.non_finite_count(),
                summary: report.summary.as_ref(),
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}

fn print_words(report: &WordsReport, top: usize, format: OutputFormat) -> Result<()> {
    let entries = report.counts.top(top);
    match format {
        OutputFormat::Table => {
            println!(
                "{} tokens, {} distinct words",
                report.counts.total_tokens(),
                report.counts.distinct()
            );
            if !entries.is_empty() {
                print!("{}", render_word_table(&entries));
            }
        }
        OutputFormat::Json => {
            let json = WordsJson {
                total_tokens: report.counts.total_tokens(),
                distinct_words: report.counts.distinct(),
                top: &entries,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}
