//! The evaluation engine.

pub mod alias;
pub mod coerce;
pub mod dispatch;
pub mod evaluate;
pub mod resolve;

use smol_core::context::EvalContext;
use smol_core::error::Result;
use smol_core::registry::Registry;
use smol_core::value::Value;
use smol_lang::Token;

/// A registry and a context, bundled for repeated evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Interpreter<'a> {
    registry: &'a Registry,
    ctx: &'a EvalContext,
}

impl<'a> Interpreter<'a> {
    pub fn new(registry: &'a Registry, ctx: &'a EvalContext) -> Self {
        Self { registry, ctx }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn context(&self) -> &'a EvalContext {
        self.ctx
    }

    /// Evaluates an expression.
    pub fn evaluate(&self, expression: &str) -> Result<Value> {
        evaluate::present(self.evaluate_at(expression, 0)?)
    }

    /// Expands a leading alias word, then evaluates the result.
    pub fn evaluate_aliased(&self, expression: &str) -> Result<Value> {
        let expanded = alias::expand_alias(expression, self.registry)?;
        self.evaluate(&expanded)
    }

    /// Evaluates an already lexed expression.
    pub fn evaluate_tokens(&self, tokens: &[Token]) -> Result<Value> {
        evaluate::present(self.fold(tokens, 0)?)
    }

    pub fn resolve(&self, name: &str) -> Result<Value> {
        resolve::resolve_initial_object(name, self.registry, self.ctx)
    }

    pub fn send(&self, receiver: &Value, selector: &str, argument: Option<Value>) -> Result<Value> {
        dispatch::send(receiver, selector, argument, self.ctx)
    }
}

/// Evaluates `expression` against `registry`.
pub fn evaluate(expression: &str, registry: &Registry, ctx: &EvalContext) -> Result<Value> {
    Interpreter::new(registry, ctx).evaluate(expression)
}

/// Evaluates an expression that starts with an alias word.
pub fn evaluate_aliased(expression: &str, registry: &Registry, ctx: &EvalContext) -> Result<Value> {
    Interpreter::new(registry, ctx).evaluate_aliased(expression)
}
