//! Column inventory of a loaded manifest, in the spirit of a dataframe
//! `info()` / `head()` dump.
//!
//! Every value is coerced to its string form for display. The typed record
//! columns used for arithmetic are untouched by this.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::fmt::Write as _;

/// Rows kept for `render_head`.
const PREVIEW_CAPACITY: usize = 100;

/// Longest cell printed by `render_head` before truncation.
const MAX_CELL_WIDTH: usize = 48;

/// Inferred type of a column across all non-null values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dtype {
    String,
    Int64,
    Float64,
    Boolean,
    Object,
    Mixed,
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dtype::String => "string",
            Dtype::Int64 => "Int64",
            Dtype::Float64 => "Float64",
            Dtype::Boolean => "boolean",
            Dtype::Object => "object",
            Dtype::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

/// Which JSON kinds a column has held so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SeenKinds {
    string: bool,
    int: bool,
    float: bool,
    boolean: bool,
    nested: bool,
}

impl SeenKinds {
    fn record(&mut self, value: &Value) {
        match value {
            Value::Null => {}
            Value::String(_) => self.string = true,
            Value::Bool(_) => self.boolean = true,
            Value::Number(n) if n.is_f64() => self.float = true,
            Value::Number(_) => self.int = true,
            Value::Array(_) | Value::Object(_) => self.nested = true,
        }
    }

    fn dtype(&self) -> Dtype {
        let numeric = self.int || self.float;
        let families = [self.string, numeric, self.boolean, self.nested]
            .iter()
            .filter(|seen| **seen)
            .count();

        match families {
            0 => Dtype::Object,
            1 if self.string => Dtype::String,
            1 if self.float => Dtype::Float64,
            1 if self.int => Dtype::Int64,
            1 if self.boolean => Dtype::Boolean,
            1 => Dtype::Object,
            _ => Dtype::Mixed,
        }
    }
}

/// One column of the schema report.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub non_null: usize,
    kinds: SeenKinds,
}

impl ColumnInfo {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            non_null: 0,
            kinds: SeenKinds::default(),
        }
    }

    pub fn dtype(&self) -> Dtype {
        self.kinds.dtype()
    }
}

/// Schema report for a whole manifest.
#[derive(Debug, Clone, Default)]
pub struct TableInfo {
    pub rows: usize,
    /// Columns in first-seen order.
    pub columns: Vec<ColumnInfo>,
    index: HashMap<String, usize>,
    preview: Vec<Map<String, Value>>,
}

impl TableInfo {
    /// Account for one parsed row.
    pub fn observe(&mut self, row: &Map<String, Value>) {
        self.rows += 1;
        for (name, value) in row {
            let idx = match self.index.get(name) {
                Some(&idx) => idx,
                None => {
                    self.columns.push(ColumnInfo::new(name));
                    self.index.insert(name.clone(), self.columns.len() - 1);
                    self.columns.len() - 1
                }
            };
            let column = &mut self.columns[idx];
            if !value.is_null() {
                column.non_null += 1;
            }
            column.kinds.record(value);
        }
        if self.preview.len() < PREVIEW_CAPACITY {
            self.preview.push(row.clone());
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.index.get(name).map(|&idx| &self.columns[idx])
    }

    /// Text block listing every column with its non-null count and dtype.
    pub fn render_info(&self, source: &str) -> String {
        let name_width = self
            .columns
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0)
            .max("Column".len());

        let mut out = String::new();
        let _ = writeln!(out, "<manifest: {}>", source);
        if self.rows == 0 {
            let _ = writeln!(out, "Entries: 0");
        } else {
            let _ = writeln!(out, "Entries: {}, 0 to {}", self.rows, self.rows - 1);
        }
        let _ = writeln!(out, "Data columns (total {} columns):", self.columns.len());
        let _ = writeln!(
            out,
            " #   {:<name_width$}  Non-Null Count  Dtype",
            "Column"
        );
        let _ = writeln!(
            out,
            "---  {:<name_width$}  --------------  -----",
            "------"
        );
        for (i, column) in self.columns.iter().enumerate() {
            let count = format!("{} non-null", column.non_null);
            let _ = writeln!(
                out,
                " {:<3} {:<name_width$}  {:<14}  {}",
                i,
                column.name,
                count,
                column.dtype()
            );
        }

        let mut dtype_counts: Vec<(String, usize)> = Vec::new();
        for column in &self.columns {
            let dtype = column.dtype().to_string();
            match dtype_counts.iter_mut().find(|(d, _)| *d == dtype) {
                Some((_, n)) => *n += 1,
                None => dtype_counts.push((dtype, 1)),
            }
        }
        let dtypes: Vec<String> = dtype_counts
            .iter()
            .map(|(d, n)| format!("{}({})", d, n))
            .collect();
        let _ = writeln!(out, "dtypes: {}", dtypes.join(", "));
        out
    }

    /// First `n` rows as a string-coerced table.
    pub fn render_head(&self, n: usize) -> String {
        let rows: Vec<Vec<String>> = self
            .preview
            .iter()
            .take(n)
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| truncate(&row.get(&c.name).map(display_value).unwrap_or_else(na)))
                    .collect()
            })
            .collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.name.chars().count()).collect();
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }
        let index_width = rows.len().saturating_sub(1).to_string().len();

        let mut out = String::new();
        let _ = write!(out, "{:index_width$}", "");
        for (column, w) in self.columns.iter().zip(&widths) {
            let _ = write!(out, "  {:>w$}", column.name, w = *w);
        }
        out.push('\n');
        for (i, row) in rows.iter().enumerate() {
            let _ = write!(out, "{:<index_width$}", i);
            for (cell, w) in row.iter().zip(&widths) {
                let _ = write!(out, "  {:>w$}", cell, w = *w);
            }
            out.push('\n');
        }
        out
    }
}

fn na() -> String {
    "<NA>".to_string()
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        return cell.to_string();
    }
    let kept: String = cell.chars().take(MAX_CELL_WIDTH - 3).collect();
    format!("{}...", kept)
}

/// String form of a JSON value for inspection.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => na(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test row must be an object"),
        }
    }

    #[test]
    fn infers_dtypes_per_column() {
        let mut info = TableInfo::default();
        info.observe(&row(json!({"path": "a", "duration": 1, "text": "x", "ok": true})));
        info.observe(&row(json!({"path": "b", "duration": 2.5, "text": "y", "ok": false})));

        assert_eq!(info.rows, 2);
        assert_eq!(info.column("path").unwrap().dtype(), Dtype::String);
        assert_eq!(info.column("duration").unwrap().dtype(), Dtype::Float64);
        assert_eq!(info.column("ok").unwrap().dtype(), Dtype::Boolean);
    }

    #[test]
    fn integer_only_column_is_int64() {
        let mut info = TableInfo::default();
        info.observe(&row(json!({"votes": 1})));
        info.observe(&row(json!({"votes": 4})));
        assert_eq!(info.column("votes").unwrap().dtype(), Dtype::Int64);
    }

    #[test]
    fn mixed_and_nested_columns() {
        let mut info = TableInfo::default();
        info.observe(&row(json!({"x": "s", "tags": ["a"]})));
        info.observe(&row(json!({"x": 3, "tags": ["b"]})));
        assert_eq!(info.column("x").unwrap().dtype(), Dtype::Mixed);
        assert_eq!(info.column("tags").unwrap().dtype(), Dtype::Object);
    }

    #[test]
    fn nulls_do_not_count_as_non_null() {
        let mut info = TableInfo::default();
        info.observe(&row(json!({"speaker": null})));
        info.observe(&row(json!({"speaker": "s1"})));
        let column = info.column("speaker").unwrap();
        assert_eq!(column.non_null, 1);
        assert_eq!(column.dtype(), Dtype::String);
    }

    #[test]
    fn columns_keep_first_seen_order() {
        let mut info = TableInfo::default();
        info.observe(&row(json!({"path": "a", "duration": 1.0, "text": "x"})));
        info.observe(&row(json!({"path": "b", "duration": 1.0, "text": "y", "lang": "de"})));
        let names: Vec<&str> = info.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["path", "duration", "text", "lang"]);
        assert_eq!(info.column("lang").unwrap().non_null, 1);
    }

    #[test]
    fn render_info_lists_columns() {
        let mut info = TableInfo::default();
        info.observe(&row(json!({"path": "a", "duration": 1.5, "text": "x"})));
        let text = info.render_info("train.jsonl");

        assert!(text.contains("<manifest: train.jsonl>"));
        assert!(text.contains("Entries: 1, 0 to 0"));
        assert!(text.contains("total 3 columns"));
        assert!(text.contains("1 non-null"));
        assert!(text.contains("Float64"));
        assert!(text.contains("dtypes: string(2), Float64(1)"));
    }

    #[test]
    fn render_head_coerces_and_truncates() {
        let mut info = TableInfo::default();
        let long = "word ".repeat(30);
        info.observe(&row(json!({"path": "a", "duration": 2, "text": long})));
        info.observe(&row(json!({"path": "b", "duration": 3})));

        let head = info.render_head(5);
        let lines: Vec<&str> = head.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("..."));
        assert!(lines[2].contains("<NA>"));
    }

    #[test]
    fn display_value_forms() {
        assert_eq!(display_value(&json!("abc")), "abc");
        assert_eq!(display_value(&json!(2.5)), "2.5");
        assert_eq!(display_value(&json!(null)), "<NA>");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!([1, 2])), "[1,2]");
    }
}
