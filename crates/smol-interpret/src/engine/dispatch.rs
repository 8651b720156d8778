//! Message dispatch: lookup, argument checking, the gatekeeper and result
//! checking for a single send.

use std::fmt::Write;

use smol_core::context::EvalContext;
use smol_core::error::{Result, SmoltalkError};
use smol_core::message::{message_table, AliasTable, Message, MessageTable};
use smol_core::value::{Value, ValueType};
use tracing::{debug, trace};

use super::coerce::coerce;
use crate::builtins;

/// Messages every receiver understands.
fn default_messages() -> MessageTable {
    message_table([
        (
            "description",
            Message::unary(ValueType::String, |receiver, _| {
                Ok(Value::string(receiver.to_string()))
            }),
        ),
        (
            "selectors",
            Message::unary(ValueType::String, |receiver, _| {
                Ok(Value::string(selector_listing(&all_messages(receiver))))
            }),
        ),
        (
            "respondsToSelector:",
            Message::new(ValueType::String, ValueType::Bool, |receiver, argument, _| {
                let selector = argument.as_str().unwrap_or_default();
                Ok(Value::bool(all_messages(receiver).contains_key(selector)))
            }),
        ),
    ])
}

/// The table a receiver declares itself.
fn own_messages(receiver: &Value) -> MessageTable {
    match receiver {
        Value::Object(object) => object.messages(),
        other => builtins::messages_for(other),
    }
}

/// Every message the receiver understands; its own entries shadow defaults.
pub fn all_messages(receiver: &Value) -> MessageTable {
    let mut table = default_messages();
    table.extend(own_messages(receiver));
    table
}

/// Aliases a value advertises.
pub fn aliases_for(value: &Value) -> AliasTable {
    match value {
        Value::Object(object) => object.aliases(),
        other => builtins::aliases_for(other),
    }
}

fn lookup(receiver: &Value, selector: &str) -> Option<Message> {
    own_messages(receiver)
        .remove(selector)
        .or_else(|| default_messages().remove(selector))
}

/// Renders a table as the `selectors` listing.
pub fn selector_listing(table: &MessageTable) -> String {
    let mut listing = String::from("**Selectors**");
    for (name, message) in table {
        listing.push_str("\n- ");
        listing.push_str(name);
        if message.takes_argument() {
            let _ = write!(listing, " {}", message.argument_type);
        }
        if message.return_type != ValueType::Null {
            let _ = write!(listing, " -> {}", message.return_type);
        }
    }
    listing
}

fn prepare_argument(selector: &str, message: &Message, argument: Option<Value>) -> Result<Value> {
    let expected = &message.argument_type;
    let argument = match argument {
        Some(argument) if !argument.is_null() => argument,
        _ if expected.is_unchecked() => return Ok(Value::Null),
        _ => return Err(SmoltalkError::ExpectedArgumentButFoundNil(selector.to_owned())),
    };
    if expected.is_unchecked() || *expected == argument.value_type() {
        return Ok(argument);
    }
    coerce(&argument, expected).ok_or_else(|| SmoltalkError::UnexpectedArgumentType {
        selector: selector.to_owned(),
        expected: expected.clone(),
        actual: argument.value_type(),
    })
}

fn check_result(receiver: ValueType, selector: &str, message: &Message, result: Value) -> Result<Value> {
    let expected = &message.return_type;
    if result.is_null() {
        if *expected == ValueType::Null {
            return Ok(result);
        }
        return Err(SmoltalkError::MethodReturnedNil {
            selector: selector.to_owned(),
            receiver,
        });
    }
    if expected.is_unchecked() || *expected == result.value_type() {
        Ok(result)
    } else {
        Err(SmoltalkError::UnexpectedReturnType {
            receiver,
            selector: selector.to_owned(),
            expected: expected.clone(),
            actual: result.value_type(),
        })
    }
}

/// Sends `selector` to `receiver`.
///
/// A missing argument is passed as [`Value::Null`] to messages that take
/// none. Arguments of the wrong type are coerced where a conversion exists.
/// The gatekeeper in `ctx` runs before the implementation; errors from either
/// propagate unchanged.
pub fn send(receiver: &Value, selector: &str, argument: Option<Value>, ctx: &EvalContext) -> Result<Value> {
    let receiver_type = receiver.value_type();
    let Some(message) = lookup(receiver, selector) else {
        debug!(selector, receiver = %receiver_type, "unrecognised selector");
        return Err(SmoltalkError::UnrecognisedSelector {
            selector: selector.to_owned(),
            receiver: receiver_type,
        });
    };
    let argument = prepare_argument(selector, &message, argument)?;
    ctx.check(selector, &message)?;
    trace!(selector, receiver = %receiver_type, "sending message");
    let result = message.call(receiver, argument, ctx)?;
    check_result(receiver_type, selector, &message, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smol_core::value::MessagePassable;

    #[derive(Debug)]
    struct Greeter;

    impl MessagePassable for Greeter {
        fn type_name(&self) -> &str {
            "Greeter"
        }

        fn messages(&self) -> MessageTable {
            message_table([
                ("greet", Message::unary(ValueType::String, |_, _| Ok(Value::string("hi")))),
                (
                    "description",
                    Message::unary(ValueType::String, |_, _| Ok(Value::string("a greeter"))),
                ),
                ("nothing", Message::unary(ValueType::String, |_, _| Ok(Value::Null))),
                ("lying", Message::unary(ValueType::String, |_, _| Ok(Value::int(1)))),
                ("shrug", Message::unary(ValueType::Null, |_, _| Ok(Value::Null))),
                (
                    "greetNamed:",
                    Message::new(ValueType::String, ValueType::String, |_, name, _| {
                        Ok(Value::string(format!("hi {}", name)))
                    }),
                ),
            ])
        }
    }

    fn greeter() -> Value {
        Value::object(Greeter)
    }

    fn ctx() -> EvalContext {
        EvalContext::new()
    }

    #[test]
    fn own_messages_are_found() {
        assert_eq!(send(&greeter(), "greet", None, &ctx()).unwrap(), Value::string("hi"));
    }

    #[test]
    fn own_messages_shadow_defaults() {
        assert_eq!(
            send(&greeter(), "description", None, &ctx()).unwrap(),
            Value::string("a greeter")
        );
    }

    #[test]
    fn defaults_apply_to_every_value() {
        assert_eq!(
            send(&Value::int(3), "description", None, &ctx()).unwrap(),
            Value::string("3")
        );
        let responds = send(
            &greeter(),
            "respondsToSelector:",
            Some(Value::string("greet")),
            &ctx(),
        )
        .unwrap();
        assert_eq!(responds, Value::bool(true));
        let responds = send(
            &greeter(),
            "respondsToSelector:",
            Some(Value::string("fly")),
            &ctx(),
        )
        .unwrap();
        assert_eq!(responds, Value::bool(false));
    }

    #[test]
    fn listing_is_sorted_and_typed() {
        let listing = send(&greeter(), "selectors", None, &ctx()).unwrap();
        let expected = "**Selectors**\n\
            - description -> String\n\
            - greet -> String\n\
            - greetNamed: String -> String\n\
            - lying -> String\n\
            - nothing -> String\n\
            - respondsToSelector: String -> Bool\n\
            - selectors -> String\n\
            - shrug";
        assert_eq!(listing.as_str(), Some(expected));
    }

    #[test]
    fn unknown_selectors_name_the_receiver() {
        let err = send(&greeter(), "fly", None, &ctx()).unwrap_err();
        assert_eq!(err.to_string(), "[Greeter <- fly]: unrecognised selector");
    }

    #[test]
    fn missing_argument() {
        let err = send(&greeter(), "greetNamed:", None, &ctx()).unwrap_err();
        assert!(matches!(err, SmoltalkError::ExpectedArgumentButFoundNil(s) if s == "greetNamed:"));
    }

    #[test]
    fn argument_type_mismatch() {
        let err = send(&greeter(), "greetNamed:", Some(Value::bool(true)), &ctx()).unwrap_err();
        assert!(matches!(
            err,
            SmoltalkError::UnexpectedArgumentType { expected: ValueType::String, actual: ValueType::Bool, .. }
        ));
    }

    #[test]
    fn result_checks() {
        let err = send(&greeter(), "nothing", None, &ctx()).unwrap_err();
        assert!(matches!(err, SmoltalkError::MethodReturnedNil { .. }));

        let err = send(&greeter(), "lying", None, &ctx()).unwrap_err();
        assert!(matches!(
            err,
            SmoltalkError::UnexpectedReturnType { expected: ValueType::String, actual: ValueType::Int, .. }
        ));

        assert_eq!(send(&greeter(), "shrug", None, &ctx()).unwrap(), Value::Null);
    }

    #[test]
    fn gatekeeper_runs_after_argument_checks() {
        let ctx = EvalContext::new().with_gatekeeper(
            |selector: &str, _: &Message, _: &EvalContext| -> Result<()> {
                Err(eyre::eyre!("{} is not allowed", selector).into())
            },
        );
        let err = send(&greeter(), "greet", None, &ctx).unwrap_err();
        assert_eq!(err.to_string(), "greet is not allowed");

        let err = send(&greeter(), "greetNamed:", None, &ctx).unwrap_err();
        assert!(matches!(err, SmoltalkError::ExpectedArgumentButFoundNil(_)));
    }
}
