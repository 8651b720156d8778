//! Argument coercion between value types.

use smol_core::value::{Value, ValueType};
use tracing::debug;

type Conversion = fn(&Value) -> Option<Value>;

/// Every supported `(from, to)` conversion. Anything not listed fails.
static COERCIONS: [(ValueType, ValueType, Conversion); 3] = [
    (ValueType::String, ValueType::Int, string_to_int),
    (ValueType::Int, ValueType::Double, int_to_double),
    (ValueType::String, ValueType::Double, string_to_double),
];

fn string_to_int(value: &Value) -> Option<Value> {
    value.as_str().and_then(parse_int).map(Value::Int)
}

fn int_to_double(value: &Value) -> Option<Value> {
    value.as_int().map(|i| Value::Double(i as f64))
}

fn string_to_double(value: &Value) -> Option<Value> {
    value.as_str().and_then(parse_double).map(Value::Double)
}

/// Only text that starts like a number is parsed, so `inf` and `NaN` stay
/// words with or without a sign.
fn looks_numeric(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

pub fn parse_int(text: &str) -> Option<i64> {
    if !looks_numeric(text) {
        return None;
    }
    text.parse().ok()
}

pub fn parse_double(text: &str) -> Option<f64> {
    if !looks_numeric(text) {
        return None;
    }
    text.parse().ok()
}

/// Converts `value` to `target`, if a conversion is registered and succeeds.
pub fn coerce(value: &Value, target: &ValueType) -> Option<Value> {
    let source = value.value_type();
    let (_, _, conversion) = COERCIONS
        .iter()
        .find(|(from, to, _)| *from == source && to == target)?;
    let converted = conversion(value)?;
    debug!(from = %source, to = %target, %value, "coerced argument");
    Some(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_coerce() {
        assert_eq!(coerce(&Value::string("3"), &ValueType::Int), Some(Value::int(3)));
        assert_eq!(coerce(&Value::string("3"), &ValueType::Double), Some(Value::double(3.0)));
        assert_eq!(coerce(&Value::string("-2.5"), &ValueType::Double), Some(Value::double(-2.5)));
        assert_eq!(coerce(&Value::int(4), &ValueType::Double), Some(Value::double(4.0)));
    }

    #[test]
    fn garbage_does_not_coerce() {
        assert_eq!(coerce(&Value::string("abc"), &ValueType::Double), None);
        assert_eq!(coerce(&Value::string("2.5"), &ValueType::Int), None);
        assert_eq!(coerce(&Value::string("nan"), &ValueType::Double), None);
    }

    #[test]
    fn signed_words_are_not_numbers() {
        for text in ["-inf", "+nan", "-NaN", "-infinity", "+Infinity", "-", "+"] {
            assert_eq!(parse_double(text), None, "{}", text);
            assert_eq!(coerce(&Value::string(text), &ValueType::Double), None, "{}", text);
        }
        assert_eq!(parse_double("-.5"), Some(-0.5));
        assert_eq!(parse_int("+7"), Some(7));
    }

    #[test]
    fn unlisted_pairs_do_not_coerce() {
        assert_eq!(coerce(&Value::double(2.0), &ValueType::Int), None);
        assert_eq!(coerce(&Value::int(2), &ValueType::String), None);
        assert_eq!(coerce(&Value::bool(true), &ValueType::Int), None);
    }
}
