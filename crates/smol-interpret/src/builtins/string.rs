use smol_core::message::{message_table, Message, MessageTable};
use smol_core::value::{Value, ValueType};

use super::expect_str;

/// A `String -> String` message built from a plain text transformation.
fn transform(selector: &'static str, f: fn(&str) -> String) -> (&'static str, Message) {
    let message = Message::unary(ValueType::String, move |receiver, _| {
        Ok(Value::string(f(expect_str(selector, receiver)?)))
    });
    (selector, message)
}

/// Uppercases the first letter of every word and lowercases the rest.
fn capitalized(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for ch in text.chars() {
        if word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        word_start = ch.is_whitespace();
    }
    out
}

fn ransom_note(text: &str) -> String {
    text.chars()
        .enumerate()
        .flat_map(|(i, ch)| {
            let cased: Vec<char> = if i % 2 == 0 {
                ch.to_uppercase().collect()
            } else {
                ch.to_lowercase().collect()
            };
            cased
        })
        .collect()
}

fn components(text: &str, separator: &str) -> Vec<Value> {
    if separator.is_empty() {
        return vec![Value::string(text)];
    }
    text.split(separator).map(Value::string).collect()
}

pub fn messages() -> MessageTable {
    message_table([
        transform("capitalizedString", capitalized),
        transform("lowercaseString", str::to_lowercase),
        transform("uppercaseString", str::to_uppercase),
        transform("ransomNoteString", ransom_note),
        transform("reversedString", |text| text.chars().rev().collect()),
        (
            "characters",
            Message::unary(ValueType::Array, |receiver, _| {
                let text = expect_str("characters", receiver)?;
                Ok(Value::array(text.chars().map(|ch| Value::string(ch.to_string()))))
            }),
        ),
        (
            "componentsSeparatedByString:",
            Message::new(ValueType::String, ValueType::Array, |receiver, argument, _| {
                let text = expect_str("componentsSeparatedByString:", receiver)?;
                let separator = expect_str("componentsSeparatedByString:", &argument)?;
                Ok(Value::array(components(text, separator)))
            }),
        ),
    ])
}
