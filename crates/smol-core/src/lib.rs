//! Smoltalk core
//!
//! The value model shared by every Smoltalk crate: values and their type
//! tags, message metadata, the object registry, the ambient evaluation
//! context and the error type.

pub mod context;
pub mod error;
pub mod message;
pub mod registry;
pub mod value;

// Re-export commonly used items for convenience
pub use tracing;

pub use context::{Clock, EvalContext, EvalOptions, FixedClock, Gatekeeper, SystemClock};
pub use message::{message_table, AliasTable, Message, MessageFn, MessageTable};
pub use registry::Registry;
pub use value::{MessagePassable, Value, ValueType, DATE_FORMAT};

pub type Error = crate::error::SmoltalkError;
pub type Result<T> = crate::error::Result<T>;
