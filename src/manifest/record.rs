use serde::{Deserialize, Serialize};

use super::schema::TableInfo;

/// One audio sample in the manifest.
///
/// Fields other than these three are tolerated and ignored here; they only
/// show up in the schema report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestRecord {
    /// Audio file location.
    #[serde(alias = "audio_filepath", alias = "audio_path")]
    pub path: String,
    /// Clip length in seconds.
    pub duration: f64,
    /// Reference transcript.
    pub text: String,
}

/// All records of a manifest in file order, plus its schema report.
#[derive(Debug, Clone, Default)]
pub struct ManifestTable {
    records: Vec<ManifestRecord>,
    info: TableInfo,
}

impl ManifestTable {
    pub fn new(records: Vec<ManifestRecord>, info: TableInfo) -> Self {
        Self { records, info }
    }

    /// Build a table straight from records, inferring the schema from them.
    pub fn from_records(records: Vec<ManifestRecord>) -> Self {
        let mut info = TableInfo::default();
        for record in &records {
            if let Ok(serde_json::Value::Object(row)) = serde_json::to_value(record) {
                info.observe(&row);
            }
        }
        Self { records, info }
    }

    pub fn records(&self) -> &[ManifestRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn info(&self) -> &TableInfo {
        &self.info
    }

    /// Transcript column.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.text.as_str())
    }

    /// Total audio duration in seconds.
    pub fn total_duration(&self) -> f64 {
        self.records.iter().map(|r| r.duration).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, duration: f64, text: &str) -> ManifestRecord {
        ManifestRecord {
            path: path.to_string(),
            duration,
            text: text.to_string(),
        }
    }

    #[test]
    fn deserializes_canonical_fields() {
        let r: ManifestRecord =
            serde_json::from_str(r#"{"path":"a.flac","duration":2.5,"text":"hi there"}"#)
                .unwrap();
        assert_eq!(r, record("a.flac", 2.5, "hi there"));
    }

    #[test]
    fn deserializes_path_aliases() {
        let nemo: ManifestRecord =
            serde_json::from_str(r#"{"audio_filepath":"b.wav","duration":1,"text":"x"}"#)
                .unwrap();
        assert_eq!(nemo.path, "b.wav");
        assert_eq!(nemo.duration, 1.0);

        let alt: ManifestRecord =
            serde_json::from_str(r#"{"audio_path":"c.mp3","duration":3,"text":"y"}"#).unwrap();
        assert_eq!(alt.path, "c.mp3");
    }

    #[test]
    fn ignores_extra_fields() {
        let r: ManifestRecord = serde_json::from_str(
            r#"{"path":"a","duration":1.0,"text":"t","speaker":"s1","votes":3}"#,
        )
        .unwrap();
        assert_eq!(r.text, "t");
    }

    #[test]
    fn from_records_infers_schema() {
        let table = ManifestTable::from_records(vec![
            record("a", 1.0, "one"),
            record("b", 2.0, "two words"),
        ]);
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert_eq!(table.info().rows, 2);
        assert_eq!(table.info().columns.len(), 3);
        assert_eq!(table.total_duration(), 3.0);
        assert_eq!(table.texts().collect::<Vec<_>>(), vec!["one", "two words"]);
    }
}
