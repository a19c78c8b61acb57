//! manifest-eda - Exploratory analysis of speech-corpus manifests
//!
//! Loads a line-delimited JSON manifest, derives speaking rate (words per
//! minute) per sample, summarizes and plots its distribution, and builds a
//! word cloud from corpus-wide word frequencies.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

pub mod analysis;
pub mod app;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod manifest;
pub mod output;
pub mod render;

// Pipeline stages
pub use analysis::{FrequencyMap, RateTable, StopWords, Summary, WordCounts, describe};
pub use manifest::{ManifestRecord, ManifestTable, load_manifest, parse_manifest};
pub use render::{CloudLayout, DistributionPlot, layout_cloud, render_distribution};

// Error handling
pub use error::{EdaError, Result};

// Config
pub use config::{CloudConfig, Config, DurationPolicy, RateConfig};

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_cargo_version() {
        let ver = version_string();
        assert!(
            ver.starts_with(env!("CARGO_PKG_VERSION")),
            "version_string should start with CARGO_PKG_VERSION, got: {}",
            ver
        );
    }

    #[test]
    fn version_string_contains_plus_when_git_hash_present() {
        let ver = version_string();
        if option_env!("GIT_HASH").is_some_and(|h| !h.is_empty()) {
            let hash_part = ver.split('+').nth(1).unwrap_or("");
            assert_eq!(hash_part.len(), 7, "Git hash should be 7 chars, got: {}", hash_part);
        } else {
            assert_eq!(ver, env!("CARGO_PKG_VERSION"));
        }
    }
}
