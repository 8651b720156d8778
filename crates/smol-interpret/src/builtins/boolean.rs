use smol_core::message::{message_table, Message, MessageTable};
use smol_core::value::{Value, ValueType};

use super::expect_bool;

pub fn messages() -> MessageTable {
    message_table([
        (
            "invertedBool",
            Message::unary(ValueType::Bool, |receiver, _| {
                Ok(Value::bool(!expect_bool("invertedBool", receiver)?))
            }),
        ),
        (
            "intValue",
            Message::unary(ValueType::Int, |receiver, _| {
                Ok(Value::int(i64::from(expect_bool("intValue", receiver)?)))
            }),
        ),
    ])
}
