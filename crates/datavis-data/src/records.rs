//! CSV-to-records conversion
//!
//! Turns a CSV dataset into an ordered sequence of field-keyed records. The
//! header row defines field identity and order; cell values are sniffed as
//! numbers where they parse losslessly and kept as verbatim strings
//! otherwise.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

/// One data row, keyed by header field name in header order
pub type Record = IndexMap<String, FieldValue>;

/// A single cell value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Cell that parsed as a finite number
    Number(f64),
    /// Everything else, verbatim with no trimming
    Text(String),
}

/// Convert CSV text into records.
///
/// Input is split on newlines and blank lines are dropped before parsing, so
/// a dataset saved with trailing or doubled newlines still converts cleanly.
/// The first surviving line is the header. `row_limit` caps the number of
/// data rows; the header never counts against it.
///
/// Rows narrower than the header are padded with empty-string cells for the
/// missing trailing fields; cells beyond the header width are ignored.
pub fn csv_to_records(csv_text: &str, row_limit: Option<usize>) -> Vec<Record> {
    let lines: Vec<&str> = csv_text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Vec::new();
    }

    let kept = match row_limit {
        Some(limit) => &lines[..lines.len().min(limit + 1)],
        None => &lines[..],
    };

    let joined = kept.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(joined.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(headers) => headers.iter().map(str::to_string).collect(),
        Err(error) => {
            warn!(%error, "unreadable CSV header");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(error) => {
                warn!(%error, "skipping malformed CSV row");
                continue;
            }
        };

        if row.len() > headers.len() {
            debug!(
                extra = row.len() - headers.len(),
                "ignoring cells beyond the header width"
            );
        }

        let mut record = Record::with_capacity(headers.len());
        for (idx, field) in headers.iter().enumerate() {
            record.insert(field.clone(), coerce_cell(row.get(idx).unwrap_or("")));
        }
        records.push(record);
    }

    records
}

/// Serialize records to JSON text, or the empty string on failure.
pub fn records_to_json(records: &[Record]) -> String {
    serde_json::to_string(records).unwrap_or_else(|error| {
        warn!(%error, "failed to serialize dataset records");
        String::new()
    })
}

/// Numeric-looking cells become numbers; non-finite parses (inf, NaN) stay
/// text so they survive JSON serialization.
fn coerce_cell(cell: &str) -> FieldValue {
    match cell.parse::<f64>() {
        Ok(number) if number.is_finite() => FieldValue::Number(number),
        _ => FieldValue::Text(cell.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn test_basic_conversion() {
        let records = csv_to_records("a,b\n1,x\n2,y", None);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["a"], FieldValue::Number(1.0));
        assert_eq!(records[0]["b"], text("x"));
        assert_eq!(records[1]["a"], FieldValue::Number(2.0));
        assert_eq!(records[1]["b"], text("y"));
    }

    #[test]
    fn test_header_defines_field_order() {
        let records = csv_to_records("z,m,a\n1,2,3", None);
        let keys: Vec<&str> = records[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "m", "a"]);
    }

    #[test]
    fn test_row_limit_excludes_header() {
        let records = csv_to_records("a,b\n1,x\n2,y\n3,z", Some(1));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["b"], text("x"));

        // A limit larger than the data is harmless.
        assert_eq!(csv_to_records("a,b\n1,x\n2,y\n3,z", Some(10)).len(), 3);
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        let records = csv_to_records("\na,b\n\n1,x\n\n\n2,y\n", None);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["a"], FieldValue::Number(1.0));
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let records = csv_to_records("city,note\nSpringfield,\"pop, growing\"", None);
        assert_eq!(records[0]["note"], text("pop, growing"));
    }

    #[test]
    fn test_values_are_verbatim_strings() {
        // No trimming: padded numerals stay text.
        let records = csv_to_records("a,b\n 1,x \n", None);
        assert_eq!(records[0]["a"], text(" 1"));
        assert_eq!(records[0]["b"], text("x "));
    }

    #[test]
    fn test_row_width_mismatch() {
        let records = csv_to_records("a,b,c\n1,2\n1,2,3,4", None);
        // Short row padded with empty strings.
        assert_eq!(records[0]["c"], text(""));
        // Extra trailing cells ignored.
        assert_eq!(records[1].len(), 3);
        assert_eq!(records[1]["c"], FieldValue::Number(3.0));
    }

    #[test]
    fn test_non_finite_numbers_stay_text() {
        let records = csv_to_records("a\ninf\nNaN\n1e3", None);
        assert_eq!(records[0]["a"], text("inf"));
        assert_eq!(records[1]["a"], text("NaN"));
        assert_eq!(records[2]["a"], FieldValue::Number(1000.0));
    }

    #[test]
    fn test_empty_and_header_only_input() {
        assert!(csv_to_records("", None).is_empty());
        assert!(csv_to_records("\n\n", None).is_empty());
        assert!(csv_to_records("a,b\n", None).is_empty());
    }

    #[test]
    fn test_crlf_input() {
        let records = csv_to_records("a,b\r\n1,x\r\n", None);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["b"], text("x"));
    }

    #[test]
    fn test_records_to_json() {
        let json = records_to_json(&csv_to_records("a,b\n1,x", None));
        assert_eq!(json, r#"[{"a":1.0,"b":"x"}]"#);
    }
}
