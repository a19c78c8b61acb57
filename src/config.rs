use crate::defaults;
use crate::error::{EdaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub manifest: ManifestConfig,
    pub rate: RateConfig,
    pub cloud: CloudConfig,
    pub output: OutputConfig,
}

/// Manifest input configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ManifestConfig {
    pub path: PathBuf,
    pub duration_policy: DurationPolicy,
}

/// What to do with records whose duration is zero, negative or not finite.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DurationPolicy {
    /// Fail the load with `InvalidDuration`.
    #[default]
    Reject,
    /// Keep the record; wpm becomes NaN, infinite or negative.
    Propagate,
}

/// Speaking-rate plot configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RateConfig {
    /// Fixed bin count. Automatic when unset.
    pub bins: Option<usize>,
    pub kde: bool,
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// File name inside `output.dir`. A `.svg` name writes the vector scene.
    pub output: String,
}

/// Word cloud configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CloudConfig {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub min_font_size: u32,
    pub max_font_size: u32,
    pub max_words: usize,
    /// Include the built-in English stopword list.
    pub default_stopwords: bool,
    pub extra_stopwords: Vec<String>,
    /// File name inside `output.dir`. A `.svg` name writes the vector scene.
    pub output: String,
}

/// Where rendered files go
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(defaults::MANIFEST_PATH),
            duration_policy: DurationPolicy::Reject,
        }
    }
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            bins: None,
            kde: true,
            title: defaults::PLOT_TITLE.to_string(),
            width: defaults::PLOT_SIZE,
            height: defaults::PLOT_SIZE,
            output: defaults::HISTOGRAM_FILE.to_string(),
        }
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            width: defaults::CLOUD_WIDTH,
            height: defaults::CLOUD_HEIGHT,
            background: defaults::CLOUD_BACKGROUND.to_string(),
            min_font_size: defaults::CLOUD_MIN_FONT_SIZE,
            max_font_size: defaults::CLOUD_MAX_FONT_SIZE,
            max_words: defaults::CLOUD_MAX_WORDS,
            default_stopwords: true,
            extra_stopwords: Vec::new(),
            output: defaults::CLOUD_FILE.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

impl fmt::Display for DurationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationPolicy::Reject => write!(f, "reject"),
            DurationPolicy::Propagate => write!(f, "propagate"),
        }
    }
}

impl FromStr for DurationPolicy {
    type Err = EdaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(DurationPolicy::Reject),
            "propagate" => Ok(DurationPolicy::Propagate),
            other => Err(EdaError::ConfigInvalidValue {
                key: "manifest.duration_policy".to_string(),
                message: format!("expected 'reject' or 'propagate', got '{}'", other),
            }),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Missing fields use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(EdaError::ConfigFileNotFound {
                    path: path.display().to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if it doesn't exist
    ///
    /// Only a missing file falls back to defaults; invalid TOML is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(EdaError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - MANIFEST_EDA_MANIFEST → manifest.path
    /// - MANIFEST_EDA_DURATION_POLICY → manifest.duration_policy
    /// - MANIFEST_EDA_OUTPUT_DIR → output.dir
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(path) = std::env::var("MANIFEST_EDA_MANIFEST")
            && !path.is_empty()
        {
            self.manifest.path = PathBuf::from(path);
        }

        if let Ok(policy) = std::env::var("MANIFEST_EDA_DURATION_POLICY")
            && !policy.is_empty()
        {
            self.manifest.duration_policy = policy.parse()?;
        }

        if let Ok(dir) = std::env::var("MANIFEST_EDA_OUTPUT_DIR")
            && !dir.is_empty()
        {
            self.output.dir = PathBuf::from(dir);
        }

        Ok(self)
    }

    /// Reject values no renderer can work with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |key: &str, message: &str| {
            Err(EdaError::ConfigInvalidValue {
                key: key.to_string(),
                message: message.to_string(),
            })
        };

        if let Some(bins) = self.rate.bins
            && !(1..=defaults::MAX_BINS).contains(&bins)
        {
            return invalid(
                "rate.bins",
                &format!("must be between 1 and {}", defaults::MAX_BINS),
            );
        }
        let canvas = 1..=defaults::MAX_CANVAS_EDGE;
        let edge_message = format!("must be between 1 and {} pixels", defaults::MAX_CANVAS_EDGE);
        for (key, edge) in [
            ("rate.width", self.rate.width),
            ("rate.height", self.rate.height),
            ("cloud.width", self.cloud.width),
            ("cloud.height", self.cloud.height),
        ] {
            if !canvas.contains(&edge) {
                return invalid(key, &edge_message);
            }
        }
        if self.cloud.min_font_size == 0 {
            return invalid("cloud.min_font_size", "must be at least 1");
        }
        if self.cloud.min_font_size > self.cloud.max_font_size {
            return invalid(
                "cloud.min_font_size",
                "must not exceed cloud.max_font_size",
            );
        }
        Ok(())
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/manifest-eda/config.toml on Linux, or a path relative
    /// to the working directory when no config dir is known.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("manifest-eda")
            .join("config.toml")
    }

    /// Full path of the histogram output.
    pub fn histogram_path(&self) -> PathBuf {
        self.output.dir.join(&self.rate.output)
    }

    /// Full path of the word cloud output.
    pub fn cloud_path(&self) -> PathBuf {
        self.output.dir.join(&self.cloud.output)
    }

    /// Serialize the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| EdaError::ConfigParse {
            message: e.to_string(),
        })
    }

    /// Look up a value by dotted key (e.g. `cloud.width`).
    pub fn get(&self, key: &str) -> Result<String> {
        let root = toml::Value::try_from(self).map_err(|e| EdaError::ConfigParse {
            message: e.to_string(),
        })?;

        let mut current = &root;
        for part in key.split('.') {
            current = current
                .get(part)
                .ok_or_else(|| EdaError::ConfigInvalidValue {
                    key: key.to_string(),
                    message: "no such key".to_string(),
                })?;
        }

        Ok(match current {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}
