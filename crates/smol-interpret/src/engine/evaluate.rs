//! Left-to-right folding of tokens into a value.

use smol_core::error::{Result, SmoltalkError};
use smol_core::value::Value;
use smol_lang::{scan, tokens_to_source, Token};
use tracing::trace;

use super::resolve::unquote;
use super::Interpreter;

/// A whole expression must produce a value.
pub(super) fn present(value: Value) -> Result<Value> {
    if value.is_null() {
        return Err(SmoltalkError::ExpressionReturnedNil);
    }
    Ok(value)
}

impl<'a> Interpreter<'a> {
    pub(super) fn evaluate_at(&self, expression: &str, depth: usize) -> Result<Value> {
        if let Some(limit) = self.ctx.options.max_depth {
            if depth > limit {
                return Err(SmoltalkError::NestingTooDeep { limit });
            }
        }
        let tokens = scan(expression)?;
        self.fold(&tokens, depth)
    }

    pub(super) fn fold(&self, tokens: &[Token], depth: usize) -> Result<Value> {
        let (name, messages) = match tokens.split_first() {
            Some((Token::InitialObject(name), messages)) if !messages.is_empty() => (name, messages),
            Some((Token::InitialObject(_), _)) | None => {
                return Err(SmoltalkError::ExpressionTooShort(tokens_to_source(tokens)))
            }
            Some(_) => return Err(SmoltalkError::UnexpectedError),
        };

        let mut current = self.resolve(name)?;
        for token in messages {
            trace!(depth, %token, "evaluating token");
            current = match token {
                Token::Selector(selector) => self.send(&current, selector, None)?,
                Token::ComplexSelector(selector, raw) => {
                    let argument = unquote(raw).unwrap_or(raw.as_str());
                    self.send(&current, selector, Some(Value::string(argument)))?
                }
                Token::ComplexSelectorWithExpression(selector, inner) => {
                    let argument = self.evaluate_inner(inner, depth)?;
                    self.send(&current, selector, Some(argument))?
                }
                Token::InnerExpression(inner) => self.evaluate_inner(inner, depth)?,
                // only ever the first token
                Token::InitialObject(_) => return Err(SmoltalkError::UnexpectedError),
            };
        }
        Ok(current)
    }

    fn evaluate_inner(&self, inner: &str, depth: usize) -> Result<Value> {
        let value = self.evaluate_at(inner, depth + 1)?;
        if value.is_null() {
            return Err(SmoltalkError::InnerExpressionReturnedNil(inner.to_owned()));
        }
        Ok(value)
    }
}
