//! Command implementations for the terp CLI

pub mod eval;
pub mod repl;
pub mod selectors;

// Re-export command functions
pub use eval::eval_command;
pub use repl::repl_command;
pub use selectors::selectors_command;

use console::style;
use smol_core::Value;

/// Print a successful result the same way for every command.
pub(crate) fn print_result(value: &Value) {
    println!("{} {}", style("Result:").green().bold(), style(value).cyan());
}
