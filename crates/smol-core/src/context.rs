//! Ambient state shared by every message send of one evaluation.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::message::Message;
use crate::value::Value;

/// Source of "now" for date constructors and messages.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Asked before every message implementation runs.
///
/// Returning an error aborts the send without running the implementation;
/// hosts use this for sandboxing and quota policies.
pub trait Gatekeeper: Send + Sync {
    fn can_run(&self, selector: &str, message: &Message, ctx: &EvalContext) -> Result<()>;
}

impl<F> Gatekeeper for F
where
    F: Fn(&str, &Message, &EvalContext) -> Result<()> + Send + Sync,
{
    fn can_run(&self, selector: &str, message: &Message, ctx: &EvalContext) -> Result<()> {
        self(selector, message, ctx)
    }
}

#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// Maximum nesting of bracketed sub-expressions. `None` is unbounded.
    pub max_depth: Option<usize>,
}

#[derive(Clone)]
pub struct EvalContext {
    /// Immutable value readable by every message implementation.
    pub user_info: Option<Value>,
    pub gatekeeper: Option<Arc<dyn Gatekeeper>>,
    pub clock: Arc<dyn Clock>,
    pub options: EvalOptions,
}

impl EvalContext {
    pub fn new() -> Self {
        Self {
            user_info: None,
            gatekeeper: None,
            clock: Arc::new(SystemClock),
            options: EvalOptions::default(),
        }
    }

    pub fn with_user_info(mut self, user_info: impl Into<Value>) -> Self {
        self.user_info = Some(user_info.into());
        self
    }

    pub fn with_gatekeeper(mut self, gatekeeper: impl Gatekeeper + 'static) -> Self {
        self.gatekeeper = Some(Arc::new(gatekeeper));
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = Some(max_depth);
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Runs the gatekeeper, if any, for one send.
    pub fn check(&self, selector: &str, message: &Message) -> Result<()> {
        match &self.gatekeeper {
            Some(gatekeeper) => gatekeeper.can_run(selector, message, self),
            None => Ok(()),
        }
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for EvalContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvalContext")
            .field("user_info", &self.user_info)
            .field("gatekeeper", &self.gatekeeper.is_some())
            .field("options", &self.options)
            .finish()
    }
}
