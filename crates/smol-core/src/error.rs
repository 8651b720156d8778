use miette::Diagnostic;
use std::result;
use thiserror::Error;

use crate::value::ValueType;

/// Everything that can abort the evaluation of an expression.
///
/// No variant is recoverable locally: the first error raised anywhere in an
/// expression, including inside bracketed sub-expressions, is returned to the
/// caller unchanged.
#[derive(Error, Debug, Diagnostic)]
pub enum SmoltalkError {
    #[error("[{0}]: initial object or first selector not found; expression is too short")]
    #[diagnostic(
        code(smoltalk::expression_too_short),
        help("an expression needs a receiver followed by at least one message")
    )]
    ExpressionTooShort(String),

    #[error("[{0}]: no such initial object")]
    #[diagnostic(
        code(smoltalk::no_initial_object),
        help("use a registered object name, a number, or a quoted string")
    )]
    NoInitialObject(String),

    #[error("[{0}]: unrecognised message alias")]
    #[diagnostic(code(smoltalk::unrecognised_alias))]
    UnrecognisedAlias(String),

    #[error("[{receiver} <- {selector}]: unrecognised selector")]
    #[diagnostic(
        code(smoltalk::unrecognised_selector),
        help("send `selectors` to the receiver to list the messages it understands")
    )]
    UnrecognisedSelector {
        selector: String,
        receiver: ValueType,
    },

    #[error("[{selector}]: message expected argument of type {expected} but received {actual}")]
    #[diagnostic(code(smoltalk::unexpected_argument_type))]
    UnexpectedArgumentType {
        selector: String,
        expected: ValueType,
        actual: ValueType,
    },

    #[error(
        "[{receiver} {selector}]: expression expected to return value of type {expected} but returned {actual}"
    )]
    #[diagnostic(code(smoltalk::unexpected_return_type))]
    UnexpectedReturnType {
        receiver: ValueType,
        selector: String,
        expected: ValueType,
        actual: ValueType,
    },

    #[error("[{receiver} <- {selector}]: method returned nil")]
    #[diagnostic(code(smoltalk::method_returned_nil))]
    MethodReturnedNil {
        selector: String,
        receiver: ValueType,
    },

    #[error("expression returned nil")]
    #[diagnostic(code(smoltalk::expression_returned_nil))]
    ExpressionReturnedNil,

    #[error("[{0}]: inner expression returned nil, interrupting the outer expression")]
    #[diagnostic(code(smoltalk::inner_expression_returned_nil))]
    InnerExpressionReturnedNil(String),

    #[error("[{0}]: expected argument but found nil")]
    #[diagnostic(
        code(smoltalk::expected_argument),
        help("keyword selectors ending in `:` must be followed by an argument")
    )]
    ExpectedArgumentButFoundNil(String),

    #[error("expression nesting exceeds the limit of {limit}")]
    #[diagnostic(code(smoltalk::nesting_too_deep))]
    NestingTooDeep { limit: usize },

    #[error("unexpected Smoltalk error")]
    #[diagnostic(code(smoltalk::unexpected))]
    UnexpectedError,

    /// Raised by a message implementation or a gatekeeper.
    #[error(transparent)]
    Raised(#[from] eyre::Report),
}

impl SmoltalkError {
    /// Wraps an arbitrary error raised while running a message.
    pub fn raised(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        SmoltalkError::Raised(eyre::Report::new(err))
    }

    /// The selector this error is about, if any.
    pub fn selector(&self) -> Option<&str> {
        match self {
            SmoltalkError::UnrecognisedSelector { selector, .. }
            | SmoltalkError::UnexpectedArgumentType { selector, .. }
            | SmoltalkError::UnexpectedReturnType { selector, .. }
            | SmoltalkError::MethodReturnedNil { selector, .. } => Some(selector),
            SmoltalkError::ExpectedArgumentButFoundNil(selector) => Some(selector),
            _ => None,
        }
    }
}

pub type Result<T> = result::Result<T, SmoltalkError>;
