use smol_core::error::SmoltalkError;
use smol_core::value::{Value, ValueType};
use thiserror::Error;

/// Errors raised by the built-in message implementations.
///
/// They reach callers wrapped in [`SmoltalkError::Raised`]; use
/// `eyre::Report::downcast_ref::<BuiltinError>()` to inspect them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuiltinError {
    #[error("index {index} is out of bounds for a collection of {len} elements")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("no element for key {0:?}")]
    KeyNotFound(String),

    #[error("cannot parse date {input:?}, expected the format `{format}`")]
    InvalidDate { input: String, format: &'static str },

    #[error("invalid date format {0:?}")]
    InvalidDateFormat(String),

    #[error("date is out of the representable range")]
    DateOutOfRange,

    #[error("{0} cannot be represented as an integer")]
    NotRepresentable(f64),

    #[error("`{selector}` expected a {expected} operand but got {actual}")]
    OperandMismatch {
        selector: &'static str,
        expected: ValueType,
        actual: ValueType,
    },
}

impl From<BuiltinError> for SmoltalkError {
    fn from(err: BuiltinError) -> Self {
        SmoltalkError::raised(err)
    }
}

/// Create an operand mismatch error for `selector`.
pub fn operand_mismatch(selector: &'static str, expected: ValueType, actual: &Value) -> SmoltalkError {
    BuiltinError::OperandMismatch {
        selector,
        expected,
        actual: actual.value_type(),
    }
    .into()
}

/// Return early from a message implementation with a [`BuiltinError`].
#[macro_export]
macro_rules! builtin_bail {
    ($err:expr) => {
        return Err($crate::error::BuiltinError::from($err).into())
    };
}

/// Return a [`BuiltinError`] unless the condition holds.
#[macro_export]
macro_rules! builtin_ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            $crate::builtin_bail!($err);
        }
    };
}
