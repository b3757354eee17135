//! Column names from the header row.

use std::collections::HashSet;

use calamine::Data;

use crate::workbook::value::{DATETIME_FORMAT, MAX_SAFE_INTEGER};

/// Turn the header row into unique column names, in column order.
///
/// Blank headers become `Unnamed: <index>`; repeated names get `.1`, `.2`, …
/// suffixes so every key in a row record is distinct.
pub fn column_names(header: &[Data]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(header.len());
    header
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let base = header_label(cell).unwrap_or_else(|| format!("Unnamed: {index}"));
            let mut name = base.clone();
            let mut suffix = 1;
            while !seen.insert(name.clone()) {
                name = format!("{base}.{suffix}");
                suffix += 1;
            }
            name
        })
        .collect()
}

fn header_label(cell: &Data) -> Option<String> {
    let label = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => naive.format(DATETIME_FORMAT).to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    };
    if label.is_empty() {
        None
    } else {
        Some(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    #[test]
    fn test_plain_header() {
        assert_eq!(column_names(&[s("id"), s("name"), s("score")]), vec!["id", "name", "score"]);
    }

    #[test]
    fn test_blank_headers_are_named_by_position() {
        assert_eq!(
            column_names(&[s("id"), Data::Empty, s(""), s("total")]),
            vec!["id", "Unnamed: 1", "Unnamed: 2", "total"]
        );
    }

    #[test]
    fn test_duplicates_get_suffixes() {
        assert_eq!(
            column_names(&[s("a"), s("a"), s("a.1"), s("a")]),
            vec!["a", "a.1", "a.1.1", "a.2"]
        );
    }

    #[test]
    fn test_non_string_headers() {
        assert_eq!(
            column_names(&[Data::Float(2024.0), Data::Float(1.5), Data::Int(7), Data::Bool(true)]),
            vec!["2024", "1.5", "7", "True"]
        );
    }

    #[test]
    fn test_numeric_headers() {
        assert_eq!(
            column_names(&[Data::Float(2024.0), Data::Float(1.5), Data::Float(1e300)]),
            vec!["2024".to_string(), "1.5".to_string(), 1e300_f64.to_string()]
        );
    }
}
