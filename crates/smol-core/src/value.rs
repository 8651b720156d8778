use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::message::{AliasTable, MessageTable};

/// Format used when a date is rendered or parsed from text.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Capability implemented by host types that want to receive messages.
///
/// The built-in variants of [`Value`] get their message tables from the
/// interpreter's standard library; anything else enters evaluation as a
/// [`Value::Object`] wrapping an implementation of this trait.
pub trait MessagePassable: Debug + Send + Sync {
    /// Name reported in type tags and diagnostics.
    fn type_name(&self) -> &str;

    /// Messages this object responds to, keyed by selector.
    fn messages(&self) -> MessageTable;

    /// Shorthand words that expand to `<registry name> <target>`.
    fn aliases(&self) -> AliasTable {
        AliasTable::new()
    }

    /// Human-readable rendering, used by the `description` message.
    fn describe(&self) -> String {
        format!("<{}>", self.type_name())
    }
}

/// Runtime type tag of a [`Value`].
///
/// `Null` and `Any` are the two sentinels used by message metadata: `Null`
/// means "no argument" / "no result", `Any` opts out of type checking.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Any,
    Bool,
    Int,
    Double,
    String,
    Date,
    Array,
    Map,
    Object(Arc<str>),
}

impl ValueType {
    /// True for the sentinels that disable argument/return checking.
    pub fn is_unchecked(&self) -> bool {
        matches!(self, ValueType::Null | ValueType::Any)
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Null => write!(f, "Null"),
            ValueType::Any => write!(f, "Any"),
            ValueType::Bool => write!(f, "Bool"),
            ValueType::Int => write!(f, "Int"),
            ValueType::Double => write!(f, "Double"),
            ValueType::String => write!(f, "String"),
            ValueType::Date => write!(f, "Date"),
            ValueType::Array => write!(f, "Array"),
            ValueType::Map => write!(f, "Map"),
            ValueType::Object(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    /// Absence of a value. Never produced by a literal.
    Null,
    /// Wildcard placeholder. Never produced by a literal.
    Any,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Object(Arc<dyn MessagePassable>),
}

impl Value {
    pub fn bool(b: bool) -> Value {
        Value::Bool(b)
    }
    pub fn int(i: i64) -> Value {
        Value::Int(i)
    }
    pub fn double(d: f64) -> Value {
        Value::Double(d)
    }
    pub fn string(s: impl Into<String>) -> Value {
        Value::String(s.into())
    }
    pub fn date(date: DateTime<Utc>) -> Value {
        Value::Date(date)
    }
    pub fn array(values: impl IntoIterator<Item = Value>) -> Value {
        Value::Array(values.into_iter().collect())
    }
    pub fn map(pairs: impl IntoIterator<Item = (String, Value)>) -> Value {
        Value::Map(pairs.into_iter().collect())
    }
    pub fn object(object: impl MessagePassable + 'static) -> Value {
        Value::Object(Arc::new(object))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Any => ValueType::Any,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Double(_) => ValueType::Double,
            Value::String(_) => ValueType::String,
            Value::Date(_) => ValueType::Date,
            Value::Array(_) => ValueType::Array,
            Value::Map(_) => ValueType::Map,
            Value::Object(object) => ValueType::Object(Arc::from(object.type_name())),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Date(date) => Some(*date),
            _ => None,
        }
    }
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Rendering used for values nested inside collections: strings quoted.
    fn fmt_nested(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            other => write!(f, "{}", other),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::Any, Value::Any) => true,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::Int(l), Value::Int(r)) => l == r,
            (Value::Double(l), Value::Double(r)) => l == r,
            (Value::String(l), Value::String(r)) => l == r,
            (Value::Date(l), Value::Date(r)) => l == r,
            (Value::Array(l), Value::Array(r)) => l == r,
            (Value::Map(l), Value::Map(r)) => l == r,
            // objects have identity only
            (Value::Object(l), Value::Object(r)) => {
                Arc::as_ptr(l) as *const () == Arc::as_ptr(r) as *const ()
            }
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "nil"),
            Value::Any => write!(f, "Any"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            // Debug keeps the trailing `.0` on whole numbers
            Value::Double(d) => write!(f, "{:?}", d),
            Value::String(s) => write!(f, "{}", s),
            Value::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Value::Array(values) => {
                write!(f, "[")?;
                let mut first = true;
                for value in values {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    value.fmt_nested(f)?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                if map.is_empty() {
                    return write!(f, "[:]");
                }
                write!(f, "[")?;
                let mut first = true;
                for (key, value) in map {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    write!(f, "{:?}: ", key)?;
                    value.fmt_nested(f)?;
                }
                write!(f, "]")
            }
            Value::Object(object) => write!(f, "{}", object.describe()),
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
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}
impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}
impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug)]
    struct Probe;

    impl MessagePassable for Probe {
        fn type_name(&self) -> &str {
            "Probe"
        }
        fn messages(&self) -> MessageTable {
            MessageTable::new()
        }
    }

    #[test]
    fn doubles_keep_their_fraction_when_displayed() {
        assert_eq!(Value::double(3.0).to_string(), "3.0");
        assert_eq!(Value::double(0.5).to_string(), "0.5");
        assert_eq!(Value::int(3).to_string(), "3");
    }

    #[test]
    fn collections_quote_nested_strings() {
        let array = Value::array(vec![Value::string("a"), Value::int(1)]);
        assert_eq!(array.to_string(), "[\"a\", 1]");

        let map = Value::map(vec![("k".to_owned(), Value::string("v"))]);
        assert_eq!(map.to_string(), "[\"k\": \"v\"]");
        assert_eq!(Value::map(Vec::new()).to_string(), "[:]");
    }

    #[test]
    fn dates_render_with_offset() {
        let date = Utc.with_ymd_and_hms(2018, 12, 1, 10, 30, 0).unwrap();
        assert_eq!(Value::date(date).to_string(), "2018-12-01 10:30:00 +0000");
    }

    #[test]
    fn objects_report_their_type_name_and_compare_by_identity() {
        let probe = Value::object(Probe);
        assert_eq!(probe.value_type(), ValueType::Object(Arc::from("Probe")));
        assert_eq!(probe.to_string(), "<Probe>");
        assert_eq!(probe, probe.clone());
        assert_ne!(probe, Value::object(Probe));
    }

    #[test]
    fn sentinels_are_unchecked() {
        assert!(ValueType::Null.is_unchecked());
        assert!(ValueType::Any.is_unchecked());
        assert!(!ValueType::String.is_unchecked());
    }
}
