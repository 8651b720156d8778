use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, TimeDelta, Utc};
use smol_core::message::{message_table, AliasTable, Message, MessageTable};
use smol_core::value::{Value, ValueType, DATE_FORMAT};

use super::{expect_date, expect_double, expect_str};
use crate::{builtin_bail, builtin_ensure};
use crate::error::BuiltinError;

/// Unix timestamp of 2001-01-01 00:00:00 UTC.
pub const REFERENCE_DATE_TIMESTAMP: i64 = 978_307_200;

fn seconds_since_epoch(date: DateTime<Utc>) -> f64 {
    date.timestamp() as f64 + f64::from(date.timestamp_subsec_nanos()) / 1e9
}

fn ordinal(n: u32) -> String {
    let suffix = match n {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

fn formatted(date: DateTime<Utc>, format: &str) -> Result<String, BuiltinError> {
    let invalid = || BuiltinError::InvalidDateFormat(format.to_owned());
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }
    let mut out = String::new();
    write!(out, "{}", date.format_with_items(StrftimeItems::new(format))).map_err(|_| invalid())?;
    Ok(out)
}

/// A `Date -> String` message rendering one strftime pattern.
fn component(selector: &'static str, format: &'static str) -> (&'static str, Message) {
    let message = Message::unary(ValueType::String, move |receiver, _| {
        let date = expect_date(selector, receiver)?;
        Ok(Value::string(date.format(format).to_string()))
    });
    (selector, message)
}

pub fn messages() -> MessageTable {
    message_table([
        (
            "dateAddingTimeInterval:",
            Message::new(ValueType::Double, ValueType::Date, |receiver, argument, _| {
                let date = expect_date("dateAddingTimeInterval:", receiver)?;
                let seconds = expect_double("dateAddingTimeInterval:", &argument)?;
                builtin_ensure!(seconds.is_finite(), BuiltinError::DateOutOfRange);
                let whole = seconds.trunc();
                let nanos = ((seconds - whole) * 1e9).round() as i64;
                let Some(shifted) = TimeDelta::try_seconds(whole as i64)
                    .and_then(|delta| delta.checked_add(&TimeDelta::nanoseconds(nanos)))
                    .and_then(|delta| date.checked_add_signed(delta))
                else {
                    builtin_bail!(BuiltinError::DateOutOfRange);
                };
                Ok(Value::date(shifted))
            }),
        ),
        (
            "dateFromString:",
            Message::new(ValueType::String, ValueType::Date, |_, argument, _| {
                let text = expect_str("dateFromString:", &argument)?;
                match DateTime::parse_from_str(text, DATE_FORMAT) {
                    Ok(date) => Ok(Value::date(date.with_timezone(&Utc))),
                    Err(_) => builtin_bail!(BuiltinError::InvalidDate {
                        input: text.to_owned(),
                        format: DATE_FORMAT,
                    }),
                }
            }),
        ),
        component("day", "%A"),
        component("month", "%B"),
        component("year", "%Y"),
        (
            "dayOfWeekInMonth",
            Message::unary(ValueType::String, |receiver, _| {
                let date = expect_date("dayOfWeekInMonth", receiver)?;
                Ok(Value::string(((date.day() - 1) / 7 + 1).to_string()))
            }),
        ),
        (
            "quarter",
            Message::unary(ValueType::String, |receiver, _| {
                let date = expect_date("quarter", receiver)?;
                Ok(Value::string(format!("{} quarter", ordinal(date.month0() / 3 + 1))))
            }),
        ),
        (
            "today",
            Message::unary(ValueType::Date, |_, ctx| Ok(Value::date(ctx.now()))),
        ),
        (
            "stringWithFormat:",
            Message::new(ValueType::String, ValueType::String, |receiver, argument, _| {
                let date = expect_date("stringWithFormat:", receiver)?;
                let format = expect_str("stringWithFormat:", &argument)?;
                Ok(Value::string(formatted(date, format)?))
            }),
        ),
        (
            "timeIntervalSince1970",
            Message::unary(ValueType::Double, |receiver, _| {
                let date = expect_date("timeIntervalSince1970", receiver)?;
                Ok(Value::double(seconds_since_epoch(date)))
            }),
        ),
        (
            "timeIntervalSinceReferenceDate",
            Message::unary(ValueType::Double, |receiver, _| {
                let date = expect_date("timeIntervalSinceReferenceDate", receiver)?;
                Ok(Value::double(
                    seconds_since_epoch(date) - REFERENCE_DATE_TIMESTAMP as f64,
                ))
            }),
        ),
        (
            "timeIntervalSinceDate:",
            Message::new(ValueType::Date, ValueType::Double, |receiver, argument, _| {
                let date = expect_date("timeIntervalSinceDate:", receiver)?;
                let other = expect_date("timeIntervalSinceDate:", &argument)?;
                Ok(Value::double(seconds_since_epoch(date) - seconds_since_epoch(other)))
            }),
        ),
    ])
}

pub fn aliases() -> AliasTable {
    AliasTable::from([("today".to_owned(), "today".to_owned())])
}
