//! Column values with the physical type erased.
//!
//! Every driver value is mapped onto one of the [`Value`] variants during
//! materialization. Consumers match exhaustively; serialization and display
//! decide the text form of temporal and binary values in one place.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    Bytes(Vec<u8>),
    /// One-dimensional list; multi-dimensional arrays nest.
    Array(Vec<Value>),
}

impl Value {
    /// Borrow as `&str` if the value is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extract as i64 if the value is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Extract as f64 if the value is numeric.
    ///
    /// Integers are widened; text is never parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Text as `String`, or `None` for null. Other variants are rendered.
    pub fn into_string(self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Text(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    /// Type name for debugging/error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::Timestamp(_) => "timestamp",
            Value::TimestampTz(_) => "timestamptz",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
        }
    }
}

/// PostgreSQL's text form for bytea (`\x` followed by lowercase hex).
fn bytea_hex(bytes: &[u8]) -> String {
    format!("\\x{}", hex::encode(bytes))
}

/// An array element in array-literal text, quoted when it would not read
/// back as itself.
fn array_element(value: &Value) -> String {
    let text = value.to_string();
    let quote = match value {
        Value::Text(s) => {
            s.is_empty()
                || s.eq_ignore_ascii_case("null")
                || s.chars().any(|c| matches!(c, ',' | '{' | '}' | '"' | '\\') || c.is_whitespace())
        }
        _ => false,
    };
    if quote {
        format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        text
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d),
            Value::Time(t) => write!(f, "{}", t),
            Value::Timestamp(ts) => write!(f, "{}", ts),
            Value::TimestampTz(ts) => write!(f, "{}", ts.to_rfc3339()),
            Value::Bytes(b) => write!(f, "{}", bytea_hex(b)),
            Value::Array(items) => {
                let elements: Vec<String> = items.iter().map(array_element).collect();
                write!(f, "{{{}}}", elements.join(","))
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Date(d) => d.serialize(serializer),
            Value::Time(t) => t.serialize(serializer),
            Value::Timestamp(ts) => ts.serialize(serializer),
            Value::TimestampTz(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            Value::Bytes(b) => serializer.serialize_str(&bytea_hex(b)),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    fn test_as_str() {
        assert_eq!(Value::from("hello").as_str(), Some("hello"));
        assert_eq!(Value::Int(1).as_str(), None);
        assert_eq!(Value::Null.as_str(), None);
    }

    #[rstest]
    fn test_as_i64_only_for_integers() {
        assert_eq!(Value::Int(42).as_i64(), Some(42));
        assert_eq!(Value::Float(42.7).as_i64(), None);
        assert_eq!(Value::from("42").as_i64(), None);
    }

    #[rstest]
    fn test_as_f64_widens_integers() {
        assert_eq!(Value::Int(2).as_f64(), Some(2.0));
        assert_eq!(Value::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::Bool(true).as_f64(), None);
    }

    #[rstest]
    fn test_as_bool() {
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
        assert_eq!(Value::from("true").as_bool(), None);
    }

    #[rstest]
    fn test_option_conversion() {
        assert!(Value::from(None::<i64>).is_null());
        assert_eq!(Value::from(Some(7i64)), Value::Int(7));
    }

    #[rstest]
    fn test_into_string() {
        assert_eq!(Value::Null.into_string(), None);
        assert_eq!(Value::from("x").into_string(), Some("x".to_string()));
        assert_eq!(Value::Int(3).into_string(), Some("3".to_string()));
    }

    #[rstest]
    #[case(Value::Null, "null")]
    #[case(Value::Bool(true), "bool")]
    #[case(Value::Int(0), "integer")]
    #[case(Value::Float(0.0), "float")]
    #[case(Value::Text(String::new()), "text")]
    #[case(Value::Bytes(vec![]), "bytes")]
    #[case(Value::Array(vec![]), "array")]
    fn test_type_name(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.type_name(), expected);
    }

    #[rstest]
    #[case(Value::Null, "null")]
    #[case(Value::Bool(true), "true")]
    #[case(Value::Int(-12), "-12")]
    #[case(Value::Float(1.5), "1.5")]
    #[case(Value::from("a\"b"), r#""a\"b""#)]
    #[case(Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef]), r#""\\xdeadbeef""#)]
    fn test_serialize_scalars(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(serde_json::to_string(&value).unwrap(), expected);
    }

    #[rstest]
    fn test_serialize_temporals_as_iso_strings() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(serde_json::to_string(&Value::Date(date)).unwrap(), r#""2024-03-09""#);

        let ts = date.and_hms_opt(14, 5, 0).unwrap();
        assert_eq!(
            serde_json::to_string(&Value::Timestamp(ts)).unwrap(),
            r#""2024-03-09T14:05:00""#
        );

        let tz = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(
            serde_json::to_string(&Value::TimestampTz(tz)).unwrap(),
            r#""2024-03-09T14:05:00+00:00""#
        );
    }

    #[rstest]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Bytes(vec![1, 255]).to_string(), "\\x01ff");
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(Value::Date(date).to_string(), "2024-01-02");
    }

    #[rstest]
    fn test_array_serializes_as_json_list() {
        let value = Value::Array(vec![
            Value::Array(vec![Value::Int(1), Value::Null]),
            Value::Array(vec![Value::from("x"), Value::Bool(true)]),
        ]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[[1,null],["x",true]]"#);
    }

    #[rstest]
    #[case(Value::Array(vec![]), "{}")]
    #[case(Value::Array(vec![Value::Int(1), Value::Null, Value::Int(3)]), "{1,NULL,3}")]
    #[case(Value::Array(vec![Value::from("a"), Value::from("b c"), Value::from("")]), r#"{a,"b c",""}"#)]
    #[case(Value::Array(vec![Value::from("NULL"), Value::from(r#"say "hi""#)]), r#"{"NULL","say \"hi\""}"#)]
    #[case(Value::Array(vec![Value::Array(vec![Value::Int(1)]), Value::Array(vec![Value::Int(2)])]), "{{1},{2}}")]
    fn test_array_display(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }
}
