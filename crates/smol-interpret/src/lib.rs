//! Smoltalk interpreter
//!
//! This crate evaluates Smoltalk expressions: it resolves the initial
//! receiver, dispatches every message through the typed dispatcher, and
//! provides the built-in message tables for the standard value types.

pub mod builtins;
pub mod engine;
pub mod error;

pub use engine::alias::expand_alias;
pub use engine::dispatch::{aliases_for, all_messages, send, selector_listing};
pub use engine::resolve::{parse_literal, resolve_initial_object};
pub use engine::{evaluate, evaluate_aliased, Interpreter};
pub use error::BuiltinError;
