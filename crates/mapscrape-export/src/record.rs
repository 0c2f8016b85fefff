//! Flattening records into named cells.
//!
//! Records go through serde so the column set always matches the struct.
//! Nested objects are flattened with `_` between key segments
//! (`{"a": {"b": 1}}` becomes `a_b`).

use mapscrape_core::{Business, ResultSet};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ExportError;

/// Separator between nested key segments.
pub const KEY_SEPARATOR: &str = "_";

/// Serializes `record` and flattens it into `(column, value)` pairs in
/// field order. Non-object values become a single `value` column.
///
/// # Errors
///
/// Returns [`ExportError::Serialize`] if `record` cannot be serialized.
pub fn flatten_record<T: Serialize>(record: &T) -> Result<Vec<(String, Value)>, ExportError> {
    let mut out = Vec::new();
    match serde_json::to_value(record)? {
        Value::Object(map) => flatten_into(&mut out, None, map),
        other => out.push(("value".to_owned(), other)),
    }
    Ok(out)
}

fn flatten_into(out: &mut Vec<(String, Value)>, prefix: Option<&str>, map: Map<String, Value>) {
    for (key, value) in map {
        let name = match prefix {
            Some(prefix) => format!("{prefix}{KEY_SEPARATOR}{key}"),
            None => key,
        };
        match value {
            Value::Object(nested) if !nested.is_empty() => flatten_into(out, Some(&name), nested),
            other => out.push((name, other)),
        }
    }
}

/// A header row plus one value row per record.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Builds the export table for a result set. The header row is always
    /// the [`Business`] columns, so an empty set still yields a header.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Serialize`] if a record cannot be serialized.
    pub fn from_results(results: &ResultSet) -> Result<Self, ExportError> {
        let headers: Vec<String> = Business::COLUMNS.iter().map(|c| (*c).to_owned()).collect();

        let mut rows = Vec::with_capacity(results.len());
        for business in results.businesses() {
            let mut cells = flatten_record(business)?;
            let row = headers
                .iter()
                .map(|header| {
                    cells
                        .iter()
                        .position(|(name, _)| name == header)
                        .map_or(Value::Null, |i| cells.swap_remove(i).1)
                })
                .collect();
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }
}

/// Text form of a cell for delimited output.
pub(crate) fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use mapscrape_core::{ReviewAverage, ReviewCount};
    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    struct Inner {
        city: &'static str,
        zip: u32,
    }

    #[derive(Serialize)]
    struct Outer {
        name: &'static str,
        location: Inner,
    }

    #[test]
    fn nested_fields_are_joined_with_underscore() {
        let record = Outer {
            name: "Padaria",
            location: Inner {
                city: "São Paulo",
                zip: 1000,
            },
        };
        let flat = flatten_record(&record).unwrap();
        let names: Vec<&str> = flat.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["name", "location_city", "location_zip"]);
        assert_eq!(flat[1].1, json!("São Paulo"));
    }

    #[test]
    fn business_flattens_to_its_columns() {
        let flat = flatten_record(&Business::default()).unwrap();
        let names: Vec<&str> = flat.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, Business::COLUMNS);
    }

    #[test]
    fn table_rows_follow_header_order() {
        let mut results = ResultSet::new("bakery");
        results.push(Business {
            name: "Padaria".to_owned(),
            review_count: ReviewCount::Count(12),
            review_average: ReviewAverage::Absent,
            latitude: -23.5,
            longitude: -46.6,
            ..Business::default()
        });

        let table = Table::from_results(&results).unwrap();
        assert_eq!(table.headers.len(), 8);
        assert_eq!(table.rows.len(), 1);
        let row = &table.rows[0];
        assert_eq!(row[0], json!("Padaria"));
        assert_eq!(row[1], json!(""));
        assert_eq!(row[4], json!(12));
        assert_eq!(row[5], json!(""));
        assert_eq!(row[6], json!(-23.5));
    }

    #[test]
    fn empty_result_set_still_has_headers() {
        let table = Table::from_results(&ResultSet::new("nothing")).unwrap();
        assert_eq!(table.headers, Business::COLUMNS);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn cell_text_renders_absent_as_empty() {
        assert_eq!(cell_text(&Value::Null), "");
        assert_eq!(cell_text(&json!("")), "");
        assert_eq!(cell_text(&json!(4.5)), "4.5");
        assert_eq!(cell_text(&json!(1234)), "1234");
    }
}
