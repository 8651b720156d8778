//! Resolution of the first component of an expression.

use smol_core::context::EvalContext;
use smol_core::error::{Result, SmoltalkError};
use smol_core::registry::Registry;
use smol_core::value::Value;
use tracing::trace;

use super::coerce::{parse_double, parse_int};

/// Strips a surrounding `"…"` pair.
pub fn unquote(text: &str) -> Option<&str> {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

/// Reads a number or a quoted string.
pub fn parse_literal(text: &str) -> Option<Value> {
    if text.contains('.') {
        if let Some(d) = parse_double(text) {
            return Some(Value::Double(d));
        }
    }
    if let Some(i) = parse_int(text) {
        return Some(Value::Int(i));
    }
    if let Some(d) = parse_double(text) {
        return Some(Value::Double(d));
    }
    unquote(text).map(Value::string)
}

/// Turns the first component of an expression into the initial receiver.
///
/// `Date` and `String` are constructors and always win; then the registry is
/// consulted, then literals.
pub fn resolve_initial_object(name: &str, registry: &Registry, ctx: &EvalContext) -> Result<Value> {
    let value = match name {
        "Date" => Value::Date(ctx.now()),
        "String" => Value::string(""),
        _ => match registry.get(name) {
            Some(value) => value.clone(),
            None => parse_literal(name)
                .ok_or_else(|| SmoltalkError::NoInitialObject(name.to_owned()))?,
        },
    };
    trace!(name, value_type = %value.value_type(), "resolved initial object");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use smol_core::context::FixedClock;
    use smol_core::value::ValueType;

    #[test]
    fn literals() {
        assert_eq!(parse_literal("3"), Some(Value::int(3)));
        assert_eq!(parse_literal("-7"), Some(Value::int(-7)));
        assert_eq!(parse_literal("3.5"), Some(Value::double(3.5)));
        assert_eq!(parse_literal("1e3"), Some(Value::double(1000.0)));
        assert_eq!(parse_literal("\"a b\""), Some(Value::string("a b")));
        assert_eq!(parse_literal("\"\""), Some(Value::string("")));
        assert_eq!(parse_literal("hello"), None);
        assert_eq!(parse_literal("Infinity"), None);
        assert_eq!(parse_literal("-inf"), None);
        assert_eq!(parse_literal("+nan"), None);
        assert_eq!(parse_literal("-.25"), Some(Value::double(-0.25)));
    }

    #[test]
    fn constructors_win_over_the_registry() {
        let instant = Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap();
        let ctx = EvalContext::new().with_clock(FixedClock(instant));
        let registry = Registry::new().with("String", Value::string("shadowed"));

        assert_eq!(resolve_initial_object("String", &registry, &ctx).unwrap(), Value::string(""));
        assert_eq!(resolve_initial_object("Date", &registry, &ctx).unwrap(), Value::date(instant));
    }

    #[test]
    fn registry_then_literals() {
        let ctx = EvalContext::new();
        let registry = Registry::new().with("answer", Value::int(42));

        assert_eq!(resolve_initial_object("answer", &registry, &ctx).unwrap(), Value::int(42));
        assert_eq!(resolve_initial_object("Int", &registry, &ctx).unwrap(), Value::int(0));
        assert_eq!(
            resolve_initial_object("Double", &registry, &ctx).unwrap().value_type(),
            ValueType::Double
        );
        assert_eq!(resolve_initial_object("12", &registry, &ctx).unwrap(), Value::int(12));
    }

    #[test]
    fn unknown_words_fail() {
        let err = resolve_initial_object("Banana", &Registry::new(), &EvalContext::new()).unwrap_err();
        assert!(matches!(err, SmoltalkError::NoInitialObject(name) if name == "Banana"));
    }
}
