//! SQLite value and parameter plumbing shared by the repository.

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Core value types for SQLite operations
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    Boolean(bool),
}

impl Value {
    /// Integer content, if this value is an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Text content, if this value is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Real content, if this value is a real.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub(crate) fn from_sql_ref(value: ValueRef<'_>) -> Value {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(r) => Value::Real(r),
            ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
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

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

// Booleans bind as integers, per SQLite convention.
impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Value::Integer(i) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*i)),
            Value::Real(r) => ToSqlOutput::Owned(rusqlite::types::Value::Real(*r)),
            Value::Text(t) => ToSqlOutput::Borrowed(ValueRef::Text(t.as_bytes())),
            Value::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
            Value::Boolean(b) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(i64::from(*b))),
        })
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Real(r) => serializer.serialize_f64(*r),
            Value::Text(t) => serializer.serialize_str(t),
            Value::Blob(b) => serializer.serialize_bytes(b),
            Value::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

/// Parameter bindings for SQL queries
///
/// Values are bound by placeholder name, never interpolated into the query
/// text. One set per query execution.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Params {
    values: Vec<(String, Value)>,
}

impl Params {
    /// Create a new Params object
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named value. `name` is the placeholder name without the
    /// leading colon.
    pub fn with_value(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.values.push((format!(":{name}"), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn as_sql(&self) -> Vec<(&str, &dyn ToSql)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect()
    }
}

/// One result row: column name / value pairs in query-projection order.
///
/// Name lookup follows mapping semantics: when a projection repeats a column
/// name, the rightmost column wins. Positional access still reaches every
/// column.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Vec<(String, Value)>,
}

impl Record {
    pub(crate) fn new(columns: Vec<(String, Value)>) -> Self {
        Self { columns }
    }

    /// Value of the named column, or `None` if the projection has no such
    /// column.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .rev()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    /// Column name and value at the given projection position.
    pub fn get_index(&self, index: usize) -> Option<(&str, &Value)> {
        self.columns
            .get(index)
            .map(|(column, value)| (column.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate columns in projection order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(|(column, value)| (column.as_str(), value))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in &self.columns {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_conversions() {
        assert_eq!(Value::from(7_i64), Value::Integer(7));
        assert_eq!(Value::from(2015_u32), Value::Integer(2015));
        assert_eq!(Value::from(1.5), Value::Real(1.5));
        assert_eq!(Value::from("LAX"), Value::Text("LAX".to_string()));
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("AA")), Value::Text("AA".to_string()));
    }

    #[test]
    fn params_prefix_placeholder_names() {
        let params = Params::new()
            .with_value("day", 1_u32)
            .with_value("airline_name", "American Airlines");
        let bound = params.as_sql();
        assert_eq!(bound.len(), 2);
        assert_eq!(bound[0].0, ":day");
        assert_eq!(bound[1].0, ":airline_name");
    }

    #[test]
    fn record_lookup_is_last_wins() {
        let record = Record::new(vec![
            ("AIRLINE".to_string(), Value::Text("AA".to_string())),
            (
                "AIRLINE".to_string(),
                Value::Text("American Airlines".to_string()),
            ),
        ]);
        assert_eq!(
            record.get("AIRLINE").and_then(Value::as_text),
            Some("American Airlines")
        );
        assert_eq!(
            record.get_index(0),
            Some(("AIRLINE", &Value::Text("AA".to_string())))
        );
        assert_eq!(record.get("ORIGIN_AIRPORT"), None);
    }

    #[test]
    fn record_serializes_as_map_in_projection_order() {
        let record = Record::new(vec![
            ("FLIGHT_ID".to_string(), Value::Integer(1)),
            ("DELAY".to_string(), Value::Integer(25)),
            ("ORIGIN_AIRPORT".to_string(), Value::Text("LAX".to_string())),
        ]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"FLIGHT_ID":1,"DELAY":25,"ORIGIN_AIRPORT":"LAX"}"#
        );
    }
}
