//! Cell → JSON value conversion.

use calamine::{Data, ExcelDateTime};
use serde_json::{Number, Value};

/// Largest integer a JSON consumer can hold without precision loss.
pub(crate) const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Convert one cell. Error cells and non-finite numbers become `null`.
pub fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Bool(b) => Value::Bool(*b),
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => number(*f),
        Data::DateTime(dt) => date_time(dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
    }
}

/// Whole numbers are emitted as integers, everything else as floats.
pub fn number(f: f64) -> Value {
    if !f.is_finite() {
        return Value::Null;
    }
    if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
        return Value::from(f as i64);
    }
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

fn date_time(dt: &ExcelDateTime) -> Value {
    if dt.is_duration() {
        return match dt.as_duration() {
            Some(d) => number(d.num_milliseconds() as f64 / 1000.0),
            None => number(dt.as_f64()),
        };
    }
    match dt.as_datetime() {
        Some(naive) => Value::String(naive.format(DATETIME_FORMAT).to_string()),
        None => number(dt.as_f64()),
    }
}
