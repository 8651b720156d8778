use itertools::Itertools;
use rand::seq::SliceRandom;
use smol_core::message::{message_table, Message, MessageTable};
use smol_core::value::{Value, ValueType};

use super::{expect_array, expect_int, expect_map, expect_str};
use crate::builtin_bail;
use crate::engine::dispatch::send;
use crate::error::BuiltinError;

fn joined<'v>(mut values: impl Iterator<Item = &'v Value>, separator: &str) -> Value {
    Value::string(values.join(separator))
}

pub fn array_messages() -> MessageTable {
    message_table([
        (
            "appending:",
            Message::new(ValueType::Any, ValueType::Array, |receiver, argument, _| {
                let mut values = expect_array("appending:", receiver)?.to_vec();
                values.push(argument);
                Ok(Value::Array(values))
            }),
        ),
        (
            "count",
            Message::unary(ValueType::Int, |receiver, _| {
                Ok(Value::int(expect_array("count", receiver)?.len() as i64))
            }),
        ),
        (
            "componentsJoinedByString:",
            Message::new(ValueType::String, ValueType::String, |receiver, argument, _| {
                let values = expect_array("componentsJoinedByString:", receiver)?;
                let separator = expect_str("componentsJoinedByString:", &argument)?;
                Ok(joined(values.iter(), separator))
            }),
        ),
        (
            "map:",
            Message::new(ValueType::String, ValueType::Array, |receiver, argument, ctx| {
                let values = expect_array("map:", receiver)?;
                let selector = expect_str("map:", &argument)?;
                let mapped = values
                    .iter()
                    .map(|value| send(value, selector, None, ctx))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Array(mapped))
            }),
        ),
        (
            "randomElement",
            Message::unary(ValueType::Any, |receiver, _| {
                let values = expect_array("randomElement", receiver)?;
                Ok(values
                    .choose(&mut rand::thread_rng())
                    .cloned()
                    .unwrap_or(Value::Null))
            }),
        ),
        (
            "reversedArray",
            Message::unary(ValueType::Array, |receiver, _| {
                let values = expect_array("reversedArray", receiver)?;
                Ok(Value::array(values.iter().rev().cloned()))
            }),
        ),
        (
            "shuffledArray",
            Message::unary(ValueType::Array, |receiver, _| {
                let mut values = expect_array("shuffledArray", receiver)?.to_vec();
                values.shuffle(&mut rand::thread_rng());
                Ok(Value::Array(values))
            }),
        ),
        (
            "elementAtIndex:",
            Message::new(ValueType::Int, ValueType::Any, |receiver, argument, _| {
                let values = expect_array("elementAtIndex:", receiver)?;
                let index = expect_int("elementAtIndex:", &argument)?;
                match usize::try_from(index).ok().and_then(|i| values.get(i)) {
                    Some(value) => Ok(value.clone()),
                    None => builtin_bail!(BuiltinError::IndexOutOfBounds {
                        index,
                        len: values.len(),
                    }),
                }
            }),
        ),
    ])
}

pub fn map_messages() -> MessageTable {
    message_table([
        (
            "count",
            Message::unary(ValueType::Int, |receiver, _| {
                Ok(Value::int(expect_map("count", receiver)?.len() as i64))
            }),
        ),
        (
            "componentsJoinedByString:",
            Message::new(ValueType::String, ValueType::String, |receiver, argument, _| {
                let map = expect_map("componentsJoinedByString:", receiver)?;
                let separator = expect_str("componentsJoinedByString:", &argument)?;
                Ok(joined(map.values(), separator))
            }),
        ),
        (
            "keys",
            Message::unary(ValueType::Array, |receiver, _| {
                let map = expect_map("keys", receiver)?;
                Ok(Value::array(map.keys().map(Value::string)))
            }),
        ),
        (
            "values",
            Message::unary(ValueType::Array, |receiver, _| {
                let map = expect_map("values", receiver)?;
                Ok(Value::array(map.values().cloned()))
            }),
        ),
        (
            "randomElement",
            Message::unary(ValueType::Any, |receiver, _| {
                let values = expect_map("randomElement", receiver)?
                    .values()
                    .collect::<Vec<_>>();
                Ok(values
                    .choose(&mut rand::thread_rng())
                    .map(|value| (*value).clone())
                    .unwrap_or(Value::Null))
            }),
        ),
        (
            "elementForKey:",
            Message::new(ValueType::String, ValueType::Any, |receiver, argument, _| {
                let map = expect_map("elementForKey:", receiver)?;
                let key = expect_str("elementForKey:", &argument)?;
                match map.get(key) {
                    Some(value) => Ok(value.clone()),
                    None => builtin_bail!(BuiltinError::KeyNotFound(key.to_owned())),
                }
            }),
        ),
    ])
}
