//! Default configuration constants for manifest-eda.
//!
//! Shared by the config types and the renderers so the defaults stay in one
//! place.

/// Default manifest location when neither config nor CLI provide one.
pub const MANIFEST_PATH: &str = "train_manifest.jsonl";

/// Seconds per minute, the scale factor from words/second to wpm.
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Default canvas edge for the distribution plot in pixels.
///
/// Matches a 10x10 inch figure at 100 dpi.
pub const PLOT_SIZE: u32 = 1000;

/// Largest canvas edge accepted for either figure, in pixels.
pub const MAX_CANVAS_EDGE: u32 = 4096;

/// Upper bound for the histogram bin count, configured or automatic.
pub const MAX_BINS: usize = 1000;

/// Default plot title.
pub const PLOT_TITLE: &str = "Distribution of words per minute (wpm) for each audio sample";

/// Title font size in pixels.
pub const PLOT_TITLE_FONT_SIZE: u32 = 20;

/// Number of points the density curve is evaluated on.
pub const KDE_GRID_POINTS: usize = 200;

/// Default histogram output file name.
pub const HISTOGRAM_FILE: &str = "wpm_histogram.png";

/// Word cloud canvas width in pixels.
pub const CLOUD_WIDTH: u32 = 1000;

/// Word cloud canvas height in pixels.
pub const CLOUD_HEIGHT: u32 = 1000;

/// Word cloud background color.
pub const CLOUD_BACKGROUND: &str = "white";

/// Smallest font a word may be drawn at. Words that only fit below this are dropped.
pub const CLOUD_MIN_FONT_SIZE: u32 = 10;

/// Font size given to the most frequent word before fitting.
pub const CLOUD_MAX_FONT_SIZE: u32 = 200;

/// Maximum number of words considered for the cloud.
pub const CLOUD_MAX_WORDS: usize = 200;

/// Default word cloud output file name.
pub const CLOUD_FILE: &str = "word_cloud.png";

/// Advance width of one glyph as a fraction of the font size.
///
/// The cloud renders in a monospace family with a forced text length, so
/// this ratio is the exact box width per character.
pub const GLYPH_ASPECT: f64 = 0.6;

/// Number of rows shown by `info --head` when not given.
pub const HEAD_ROWS: usize = 5;

/// Number of words listed by `words` when not given.
pub const TOP_WORDS: usize = 20;
