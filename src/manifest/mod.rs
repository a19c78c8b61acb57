//! Speech-corpus manifest loading.
//!
//! A manifest is a line-delimited JSON file with one object per audio
//! sample: `{"path": ..., "duration": ..., "text": ...}`.

pub mod loader;
pub mod record;
pub mod schema;

pub use loader::{load_manifest, parse_manifest};
pub use record::{ManifestRecord, ManifestTable};
pub use schema::{ColumnInfo, Dtype, TableInfo, display_value};
