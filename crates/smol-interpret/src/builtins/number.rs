//! Arithmetic on `Int` and `Double` receivers.
//!
//! Arithmetic always works in doubles: `Int adding: 1` is `1.0`.

use smol_core::error::Result;
use smol_core::message::{message_table, Message, MessageTable};
use smol_core::value::{Value, ValueType};

use super::{expect_double, expect_int};
use crate::builtin_ensure;
use crate::error::{operand_mismatch, BuiltinError};

fn numeric(selector: &'static str, value: &Value) -> Result<f64> {
    match value {
        Value::Int(i) => Ok(*i as f64),
        Value::Double(d) => Ok(*d),
        other => Err(operand_mismatch(selector, ValueType::Double, other)),
    }
}

fn arithmetic(selector: &'static str, op: fn(f64, f64) -> f64) -> (&'static str, Message) {
    let message = Message::new(ValueType::Double, ValueType::Double, move |receiver, argument, _| {
        let lhs = numeric(selector, receiver)?;
        let rhs = expect_double(selector, &argument)?;
        Ok(Value::double(op(lhs, rhs)))
    });
    (selector, message)
}

fn arithmetic_messages() -> [(&'static str, Message); 5] {
    [
        arithmetic("adding:", |l, r| l + r),
        arithmetic("subtracting:", |l, r| l - r),
        arithmetic("multipliedBy:", |l, r| l * r),
        arithmetic("dividedBy:", |l, r| l / r),
        (
            "squareRoot",
            Message::unary(ValueType::Double, |receiver, _| {
                Ok(Value::double(numeric("squareRoot", receiver)?.sqrt()))
            }),
        ),
    ]
}

pub fn int_messages() -> MessageTable {
    let mut table = message_table(arithmetic_messages());
    table.extend(message_table([(
        "doubleValue",
        Message::unary(ValueType::Double, |receiver, _| {
            Ok(Value::double(expect_int("doubleValue", receiver)? as f64))
        }),
    )]));
    table
}

pub fn double_messages() -> MessageTable {
    let mut table = message_table(arithmetic_messages());
    table.extend(message_table([(
        "intValue",
        Message::unary(ValueType::Int, |receiver, _| {
            let d = expect_double("intValue", receiver)?;
            builtin_ensure!(
                d.is_finite() && d.trunc() >= i64::MIN as f64 && d.trunc() < i64::MAX as f64,
                BuiltinError::NotRepresentable(d)
            );
            Ok(Value::int(d.trunc() as i64))
        }),
    )]));
    table
}
