//! Message tables for the built-in value types.

mod boolean;
mod collection;
mod date;
mod number;
mod string;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use smol_core::error::Result;
use smol_core::message::{AliasTable, MessageTable};
use smol_core::value::{Value, ValueType};

use crate::error::operand_mismatch;

pub use date::REFERENCE_DATE_TIMESTAMP;

/// The table for a built-in value. Objects carry their own tables and get
/// an empty one here.
pub fn messages_for(value: &Value) -> MessageTable {
    match value {
        Value::Bool(_) => boolean::messages(),
        Value::Int(_) => number::int_messages(),
        Value::Double(_) => number::double_messages(),
        Value::String(_) => string::messages(),
        Value::Date(_) => date::messages(),
        Value::Array(_) => collection::array_messages(),
        Value::Map(_) => collection::map_messages(),
        Value::Null | Value::Any | Value::Object(_) => MessageTable::new(),
    }
}

pub fn aliases_for(value: &Value) -> AliasTable {
    match value {
        Value::Date(_) => date::aliases(),
        _ => AliasTable::new(),
    }
}

pub(crate) fn expect_bool(selector: &'static str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| operand_mismatch(selector, ValueType::Bool, value))
}

pub(crate) fn expect_int(selector: &'static str, value: &Value) -> Result<i64> {
    value
        .as_int()
        .ok_or_else(|| operand_mismatch(selector, ValueType::Int, value))
}

pub(crate) fn expect_double(selector: &'static str, value: &Value) -> Result<f64> {
    value
        .as_double()
        .ok_or_else(|| operand_mismatch(selector, ValueType::Double, value))
}

pub(crate) fn expect_str<'v>(selector: &'static str, value: &'v Value) -> Result<&'v str> {
    value
        .as_str()
        .ok_or_else(|| operand_mismatch(selector, ValueType::String, value))
}

pub(crate) fn expect_date(selector: &'static str, value: &Value) -> Result<DateTime<Utc>> {
    value
        .as_date()
        .ok_or_else(|| operand_mismatch(selector, ValueType::Date, value))
}

pub(crate) fn expect_array<'v>(selector: &'static str, value: &'v Value) -> Result<&'v [Value]> {
    value
        .as_array()
        .ok_or_else(|| operand_mismatch(selector, ValueType::Array, value))
}

pub(crate) fn expect_map<'v>(
    selector: &'static str,
    value: &'v Value,
) -> Result<&'v BTreeMap<String, Value>> {
    value
        .as_map()
        .ok_or_else(|| operand_mismatch(selector, ValueType::Map, value))
}
