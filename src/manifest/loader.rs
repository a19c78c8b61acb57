//! Line-delimited JSON manifest reader.
//!
//! All or nothing: the first bad line fails the whole load.

use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::record::{ManifestRecord, ManifestTable};
use super::schema::TableInfo;
use crate::analysis::{word_count, words_per_minute};
use crate::config::DurationPolicy;
use crate::error::{EdaError, Result};

/// Load a manifest file from disk.
pub fn load_manifest(path: &Path, policy: DurationPolicy) -> Result<ManifestTable> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => EdaError::ManifestNotFound {
            path: path.display().to_string(),
        },
        _ => EdaError::Io(e),
    })?;
    parse_manifest(BufReader::new(file), policy)
}

/// Parse a manifest from any buffered reader.
///
/// Blank lines are skipped. Line numbers in errors are 1-based and count
/// blank lines.
pub fn parse_manifest<R: BufRead>(mut reader: R, policy: DurationPolicy) -> Result<ManifestTable> {
    let mut records = Vec::new();
    let mut info = TableInfo::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = std::str::from_utf8(&buf).map_err(|e| EdaError::MalformedRecord {
            line: line_no,
            message: format!("invalid UTF-8: {}", e),
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let value: Value =
            serde_json::from_str(trimmed).map_err(|e| EdaError::MalformedRecord {
                line: line_no,
                message: e.to_string(),
            })?;
        let Value::Object(row) = value else {
            return Err(EdaError::MalformedRecord {
                line: line_no,
                message: "expected a JSON object".to_string(),
            });
        };

        info.observe(&row);

        let record: ManifestRecord =
            serde_json::from_value(Value::Object(row)).map_err(|e| EdaError::MalformedRecord {
                line: line_no,
                message: e.to_string(),
            })?;

        if policy == DurationPolicy::Reject && !has_valid_duration(&record) {
            return Err(EdaError::InvalidDuration {
                line: line_no,
                duration: record.duration,
            });
        }

        records.push(record);
    }

    Ok(ManifestTable::new(records, info))
}

/// Positive, finite, and large enough that the record's wpm stays finite.
fn has_valid_duration(record: &ManifestRecord) -> bool {
    record.duration.is_finite()
        && record.duration > 0.0
        && words_per_minute(word_count(&record.text), record.duration).is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn parse(input: &str) -> Result<ManifestTable> {
        parse_manifest(Cursor::new(input), DurationPolicy::Reject)
    }

    #[test]
    fn parses_records_in_file_order() {
        let table = parse(concat!(
            r#"{"path":"a.flac","duration":2,"text":"a a b"}"#,
            "\n",
            r#"{"path":"b.flac","duration":1,"text":"b c"}"#,
            "\n",
        ))
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].path, "a.flac");
        assert_eq!(table.records()[0].duration, 2.0);
        assert_eq!(table.records()[1].text, "b c");
        assert_eq!(table.info().rows, 2);
    }

    #[test]
    fn skips_blank_lines_and_counts_them() {
        let input = "\n{\"path\":\"a\",\"duration\":1,\"text\":\"x\"}\n\n{\"path\":\"b\"}\n";
        match parse(input) {
            Err(EdaError::MalformedRecord { line, message }) => {
                assert_eq!(line, 4);
                assert!(message.contains("duration"), "message: {}", message);
            }
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = parse("").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.info().rows, 0);
    }

    #[test]
    fn invalid_json_is_malformed() {
        match parse("{\"path\": \"a\", \"duration\": 1, \"text\": \n") {
            Err(EdaError::MalformedRecord { line, .. }) => assert_eq!(line, 1),
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn non_object_line_is_malformed() {
        match parse("[1, 2, 3]\n") {
            Err(EdaError::MalformedRecord { message, .. }) => {
                assert_eq!(message, "expected a JSON object");
            }
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn wrong_field_type_is_malformed() {
        let result = parse(r#"{"path":"a","duration":"2.0","text":"x"}"#);
        assert!(matches!(result, Err(EdaError::MalformedRecord { .. })));
    }

    #[test]
    fn zero_duration_rejected_by_default() {
        let input = concat!(
            r#"{"path":"a","duration":1,"text":"x"}"#,
            "\n",
            r#"{"path":"b","duration":0,"text":"y"}"#,
        );
        match parse(input) {
            Err(EdaError::InvalidDuration { line, duration }) => {
                assert_eq!(line, 2);
                assert_eq!(duration, 0.0);
            }
            other => panic!("Expected InvalidDuration, got {:?}", other),
        }
    }

    #[test]
    fn negative_duration_rejected_by_default() {
        let result = parse(r#"{"path":"a","duration":-1.5,"text":"x"}"#);
        assert!(matches!(result, Err(EdaError::InvalidDuration { .. })));
    }

    #[test]
    fn invalid_utf8_line_is_malformed_with_line_number() {
        let mut input = br#"{"path":"a","duration":1,"text":"ok"}"#.to_vec();
        input.extend_from_slice(b"\n{\"path\":\"b\",\"duration\":1,\"text\":\"\xff\xfe\"}\n");
        match parse_manifest(Cursor::new(input), DurationPolicy::Reject) {
            Err(EdaError::MalformedRecord { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("UTF-8"), "message: {}", message);
            }
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let table = parse(concat!(
            r#"{"path":"a","duration":1,"text":"x"}"#,
            "\r\n",
            r#"{"path":"b","duration":2,"text":"y"}"#,
        ))
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].path, "b");
    }

    #[test]
    fn subnormal_duration_rejected_when_wpm_overflows() {
        match parse(r#"{"path":"a","duration":1e-320,"text":"two words"}"#) {
            Err(EdaError::InvalidDuration { line, .. }) => assert_eq!(line, 1),
            other => panic!("Expected InvalidDuration, got {:?}", other),
        }
        // No tokens means a zero rate, which is finite.
        let table = parse(r#"{"path":"a","duration":1e-320,"text":""}"#).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn propagate_policy_keeps_bad_durations() {
        let input = concat!(
            r#"{"path":"a","duration":0,"text":"x"}"#,
            "\n",
            r#"{"path":"b","duration":-2,"text":"y"}"#,
        );
        let table = parse_manifest(Cursor::new(input), DurationPolicy::Propagate).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].duration, -2.0);
    }

    #[test]
    fn extra_columns_reach_schema_only() {
        let table =
            parse(r#"{"path":"a","duration":1.5,"text":"x","speaker":"s1","votes":2}"#).unwrap();
        assert_eq!(table.info().columns.len(), 5);
        assert_eq!(table.records()[0].text, "x");
    }

    #[test]
    fn load_manifest_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"path":"a","duration":3,"text":"one two three"}}"#).unwrap();

        let table = load_manifest(file.path(), DurationPolicy::Reject).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].text, "one two three");
    }

    #[test]
    fn missing_file_is_manifest_not_found() {
        let path = Path::new("/tmp/nonexistent_manifest_eda_12345.jsonl");
        match load_manifest(path, DurationPolicy::Reject) {
            Err(EdaError::ManifestNotFound { path }) => {
                assert!(path.ends_with("nonexistent_manifest_eda_12345.jsonl"));
            }
            other => panic!("Expected ManifestNotFound, got {:?}", other),
        }
    }
}
