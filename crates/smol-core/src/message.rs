//! Message metadata: what a selector accepts, what it returns, and the
//! function that implements it.

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::context::EvalContext;
use crate::error::Result;
use crate::value::{Value, ValueType};

/// Implementation of a message: `(receiver, argument, context) -> result`.
///
/// Unary messages receive [`Value::Null`] as their argument.
pub type MessageFn = Arc<dyn Fn(&Value, Value, &EvalContext) -> Result<Value> + Send + Sync>;

/// Selector name → metadata. Ordered so listings are stable.
pub type MessageTable = BTreeMap<String, Message>;

/// Alias word → canonical partial expression.
pub type AliasTable = BTreeMap<String, String>;

#[derive(Clone)]
pub struct Message {
    pub argument_type: ValueType,
    pub return_type: ValueType,
    function: MessageFn,
}

impl Message {
    pub fn new(
        argument_type: ValueType,
        return_type: ValueType,
        function: impl Fn(&Value, Value, &EvalContext) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            argument_type,
            return_type,
            function: Arc::new(function),
        }
    }

    /// A message without an argument.
    pub fn unary(
        return_type: ValueType,
        function: impl Fn(&Value, &EvalContext) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self::new(ValueType::Null, return_type, move |receiver, _, ctx| {
            function(receiver, ctx)
        })
    }

    /// True when the selector expects an argument.
    pub fn takes_argument(&self) -> bool {
        self.argument_type != ValueType::Null
    }

    pub fn call(&self, receiver: &Value, argument: Value, ctx: &EvalContext) -> Result<Value> {
        (self.function)(receiver, argument, ctx)
    }
}

impl Debug for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Message")
            .field("argument_type", &self.argument_type)
            .field("return_type", &self.return_type)
            .finish()
    }
}

/// Inserts `(selector, message)` pairs into a table.
pub fn message_table(entries: impl IntoIterator<Item = (&'static str, Message)>) -> MessageTable {
    entries
        .into_iter()
        .map(|(selector, message)| (selector.to_owned(), message))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unary_messages_ignore_their_argument() {
        let message = Message::unary(ValueType::Int, |_, _| Ok(Value::int(7)));
        assert!(!message.takes_argument());

        let ctx = EvalContext::default();
        let result = message
            .call(&Value::Null, Value::string("ignored"), &ctx)
            .unwrap();
        assert_eq!(result, Value::int(7));
    }

    #[test]
    fn keyword_messages_receive_receiver_and_argument() {
        let message = Message::new(ValueType::Int, ValueType::Int, |receiver, argument, _| {
            Ok(Value::int(receiver.as_int().unwrap_or(0) + argument.as_int().unwrap_or(0)))
        });
        assert!(message.takes_argument());

        let ctx = EvalContext::default();
        let result = message.call(&Value::int(2), Value::int(3), &ctx).unwrap();
        assert_eq!(result, Value::int(5));
    }

    #[test]
    fn tables_are_keyed_by_selector() {
        let table = message_table([
            ("b", Message::unary(ValueType::Null, |_, _| Ok(Value::Null))),
            ("a", Message::unary(ValueType::Null, |_, _| Ok(Value::Null))),
        ]);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
