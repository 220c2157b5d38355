//! Core types for Tabula

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::SchemaError;

/// SQL data types a column can be declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int,
    BigInt,
    Float,
    Decimal,
    Boolean,
    Text,
    Date,
    DateTime,
}

impl DataType {
    /// Every supported type, in declaration order
    pub const ALL: [DataType; 8] = [
        DataType::Int,
        DataType::BigInt,
        DataType::Float,
        DataType::Decimal,
        DataType::Boolean,
        DataType::Text,
        DataType::Date,
        DataType::DateTime,
    ];

    /// SQL keyword for this type
    pub fn as_sql(&self) -> &'static str {
        match self {
            DataType::Int => "INT",
            DataType::BigInt => "BIGINT",
            DataType::Float => "FLOAT",
            DataType::Decimal => "DECIMAL",
            DataType::Boolean => "BOOLEAN",
            DataType::Text => "TEXT",
            DataType::Date => "DATE",
            DataType::DateTime => "DATETIME",
        }
    }

    /// Look up a type by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_uppercase();
        Self::ALL.into_iter().find(|t| t.as_sql() == upper)
    }

    /// Whether the type may carry AUTO_INCREMENT
    pub fn is_integer(&self) -> bool {
        matches!(self, DataType::Int | DataType::BigInt)
    }

    /// Comma-separated list of all type names, used in error messages
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_sql())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check the textual form of a value against this type.
    ///
    /// TEXT, DATE and DATETIME have no cheap runtime check and accept
    /// anything.
    pub fn accepts(&self, text: &str) -> bool {
        match self {
            DataType::Int | DataType::BigInt => is_digit_string(text),
            DataType::Boolean => matches!(text.to_uppercase().as_str(), "TRUE" | "FALSE"),
            DataType::Float | DataType::Decimal => is_digit_string(&text.replacen('.', "", 1)),
            DataType::Text | DataType::Date | DataType::DateTime => true,
        }
    }
}

fn is_digit_string(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl std::str::FromStr for DataType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| SchemaError::InvalidDataType {
            given: s.to_string(),
            valid: Self::valid_names(),
        })
    }
}

/// A cell value stored in a row, used as a column default or compared in a
/// query condition
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL value
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Float(f64),
    /// Decimal/Numeric (stored as string for precision)
    Decimal(String),
    /// UTF-8 string
    Text(String),
    /// Date without time
    Date(NaiveDate),
    /// DateTime without timezone
    DateTime(NaiveDateTime),
    /// List of values, used by IN conditions
    List(Vec<Value>),
}

impl Value {
    /// Check if the value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(true) => write!(f, "TRUE"),
            Value::Bool(false) => write!(f, "FALSE"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
            Value::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Value::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S")),
            Value::List(items) => {
                let items: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "({})", items.join(", "))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
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

    #[test]
    fn test_data_type_from_name_is_case_insensitive() {
        assert_eq!(DataType::from_name("int"), Some(DataType::Int));
        assert_eq!(DataType::from_name("DateTime"), Some(DataType::DateTime));
        assert_eq!(DataType::from_name("varchar"), None);
    }

    #[test]
    fn test_data_type_parse_error_lists_valid_types() {
        let err = "varchar".parse::<DataType>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("varchar"));
        assert!(message.contains("INT, BIGINT, FLOAT, DECIMAL, BOOLEAN, TEXT, DATE, DATETIME"));
    }

    #[test]
    fn test_integer_validator() {
        assert!(DataType::Int.accepts("42"));
        assert!(DataType::BigInt.accepts("0"));
        assert!(!DataType::Int.accepts("-1"));
        assert!(!DataType::Int.accepts("4.2"));
        assert!(!DataType::Int.accepts(""));
    }

    #[test]
    fn test_decimal_validator_allows_one_point() {
        assert!(DataType::Decimal.accepts("99.99"));
        assert!(DataType::Float.accepts("100"));
        assert!(!DataType::Float.accepts("1.2.3"));
        assert!(!DataType::Decimal.accepts("abc"));
    }

    #[test]
    fn test_boolean_validator() {
        assert!(DataType::Boolean.accepts("true"));
        assert!(DataType::Boolean.accepts("FALSE"));
        assert!(!DataType::Boolean.accepts("yes"));
    }

    #[test]
    fn test_unvalidated_types_accept_anything() {
        assert!(DataType::Text.accepts(""));
        assert!(DataType::Date.accepts("not a date"));
        assert!(DataType::DateTime.accepts("CURRENT_TIMESTAMP"));
    }

    #[test]
    fn test_value_display() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(7, 5, 0))
            .expect("valid timestamp");

        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Bool(true).to_string(), "TRUE");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::DateTime(ts).to_string(), "2024-03-09 07:05:00");
        assert_eq!(Value::from(vec![1, 2]).to_string(), "(1, 2)");
    }
}
