//! Command-line interface for manifest-eda
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::defaults;

/// Speaking-rate and word-frequency analysis of speech-corpus manifests
#[derive(Parser, Debug)]
#[command(
    name = "manifest-eda",
    version,
    about = "Speaking-rate and word-frequency analysis of speech-corpus manifests"
)]
pub struct Cli {
    /// Subcommand to execute (default: run the whole analysis)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Manifest file (line-delimited JSON with path, duration, text)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Directory for rendered plots
    #[arg(short, long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Keep records with zero or negative duration (wpm becomes NaN/inf)
    #[arg(long, global = true)]
    pub allow_invalid_duration: bool,

    /// Suppress status output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: counts and timings, -vv: full diagnostics)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run schema report, speaking-rate and word-frequency analysis
    Run {
        /// Rows to preview after the schema report
        #[arg(long, value_name = "N", default_value_t = defaults::HEAD_ROWS)]
        head: usize,

        /// Number of most frequent words to list
        #[arg(long, value_name = "N", default_value_t = defaults::TOP_WORDS)]
        top: usize,
    },

    /// Show columns, non-null counts and types of the manifest
    Info {
        /// Rows to preview after the schema report
        #[arg(long, value_name = "N", default_value_t = defaults::HEAD_ROWS)]
        head: usize,
    },

    /// Words-per-minute summary and distribution plot
    Rate {
        /// Output format: table (default) or json
        #[arg(long, short = 'f', value_name = "FORMAT", default_value = "table")]
        format: String,

        /// Number of histogram bins (default: automatic)
        #[arg(long, value_name = "N")]
        bins: Option<usize>,

        /// Also draw the histogram in the terminal
        #[arg(long)]
        terminal: bool,
    },

    /// Word frequencies and word cloud
    Words {
        /// Number of most frequent words to list
        #[arg(long, value_name = "N", default_value_t = defaults::TOP_WORDS)]
        top: usize,

        /// Output format: table (default) or json
        #[arg(long, short = 'f', value_name = "FORMAT", default_value = "table")]
        format: String,

        /// Additional stopwords (comma-separated)
        #[arg(long, value_name = "WORDS", value_delimiter = ',')]
        stopwords: Vec<String>,
    },

    /// View configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value by key (e.g., cloud.width)
    Get {
        /// Dotted key path (e.g., manifest.path, cloud.max_words)
        key: String,
    },
    /// Print the effective configuration as TOML
    Dump,
    /// Print the default configuration file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_command() {
        let cli = Cli::try_parse_from(["manifest-eda"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(cli.manifest.is_none());
        assert!(cli.output_dir.is_none());
        assert!(!cli.allow_invalid_duration);
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_verbose_double() {
        let cli = Cli::try_parse_from(["manifest-eda", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_global_manifest_after_command() {
        let cli =
            Cli::try_parse_from(["manifest-eda", "info", "--manifest", "/data/train.jsonl"])
                .unwrap();
        assert_eq!(cli.manifest, Some(PathBuf::from("/data/train.jsonl")));
        match cli.command {
            Some(Commands::Info { head }) => assert_eq!(head, 5),
            _ => panic!("Expected Info command"),
        }
    }

    #[test]
    fn test_parse_run_defaults() {
        let cli = Cli::try_parse_from(["manifest-eda", "run"]).unwrap();
        match cli.command {
            Some(Commands::Run { head, top }) => {
                assert_eq!(head, 5);
                assert_eq!(top, 20);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_parse_rate_options() {
        let cli = Cli::try_parse_from([
            "manifest-eda",
            "rate",
            "--format",
            "json",
            "--bins",
            "30",
            "--terminal",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Rate {
                format,
                bins,
                terminal,
            }) => {
                assert_eq!(format, "json");
                assert_eq!(bins, Some(30));
                assert!(terminal);
            }
            _ => panic!("Expected Rate command"),
        }
    }

    #[test]
    fn test_parse_words_stopwords_list() {
        let cli = Cli::try_parse_from([
            "manifest-eda",
            "words",
            "--top",
            "10",
            "--stopwords",
            "uh,um",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Words {
                top,
                format,
                stopwords,
            }) => {
                assert_eq!(top, 10);
                assert_eq!(format, "table");
                assert_eq!(stopwords, vec!["uh", "um"]);
            }
            _ => panic!("Expected Words command"),
        }
    }

    #[test]
    fn test_parse_config_get() {
        let cli = Cli::try_parse_from(["manifest-eda", "config", "get", "cloud.width"]).unwrap();
        match cli.command {
            Some(Commands::Config {
                action: ConfigAction::Get { key },
            }) => assert_eq!(key, "cloud.width"),
            _ => panic!("Expected Config Get command"),
        }
    }

    #[test]
    fn test_invalid_command_returns_error() {
        let err = Cli::try_parse_from(["manifest-eda", "invalid"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["manifest-eda", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_quiet_short_flag() {
        let cli = Cli::try_parse_from(["manifest-eda", "-q", "words"]).unwrap();
        assert!(cli.quiet);
    }
}
