use itertools::Itertools;
use smol_core::error::{Result, SmoltalkError};
use tracing::trace;

use super::scanner::{step, ScanState};
use crate::token::Token;

/// Strips the brackets from a `[…]` component.
fn bracket_inner(component: &str) -> Option<&str> {
    if component.len() >= 2 && component.starts_with('[') && component.ends_with(']') {
        Some(&component[1..component.len() - 1])
    } else {
        None
    }
}

/// Turns completed components into tokens, in order.
#[derive(Debug, Default)]
struct Classifier {
    seen: usize,
    pending_keyword: Option<String>,
    tokens: Vec<Token>,
}

impl Classifier {
    fn push(&mut self, component: String) -> Result<()> {
        self.seen += 1;
        if self.seen == 1 {
            return self.emit(Token::InitialObject(component));
        }
        if component.ends_with(':') {
            // a keyword followed directly by another keyword never gets its argument
            if let Some(dangling) = self.pending_keyword.replace(component) {
                return Err(SmoltalkError::ExpectedArgumentButFoundNil(dangling));
            }
            return Ok(());
        }
        let token = if let Some(keyword) = self.pending_keyword.take() {
            match bracket_inner(&component) {
                Some(inner) => Token::ComplexSelectorWithExpression(keyword, inner.to_owned()),
                None => Token::ComplexSelector(keyword, component),
            }
        } else if let Some(inner) = bracket_inner(&component) {
            Token::InnerExpression(inner.to_owned())
        } else {
            Token::Selector(component)
        };
        self.emit(token)
    }

    fn emit(&mut self, token: Token) -> Result<()> {
        trace!(?token, "lexed token");
        self.tokens.push(token);
        Ok(())
    }

    fn finish(self, source: &str) -> Result<Vec<Token>> {
        if let Some(dangling) = self.pending_keyword {
            return Err(SmoltalkError::ExpectedArgumentButFoundNil(dangling));
        }
        if self.tokens.len() < 2 {
            return Err(SmoltalkError::ExpressionTooShort(source.to_owned()));
        }
        Ok(self.tokens)
    }
}

/// Scans an expression into tokens.
///
/// Fails with [`SmoltalkError::ExpressionTooShort`] when the expression does
/// not contain a receiver and at least one message, and with
/// [`SmoltalkError::ExpectedArgumentButFoundNil`] when a keyword selector is
/// never followed by its argument.
pub fn scan(source: &str) -> Result<Vec<Token>> {
    let mut classifier = Classifier::default();
    let mut state = ScanState::new();
    for ch in source.chars() {
        let (next, component) = step(state, ch);
        state = next;
        if let Some(component) = component {
            classifier.push(component)?;
        }
    }
    if let Some(component) = state.finish() {
        classifier.push(component)?;
    }
    classifier.finish(source)
}

/// Writes tokens back as source text, one space between components.
pub fn tokens_to_source(tokens: &[Token]) -> String {
    tokens.iter().join(" ")
}
