//! Smoltalk CLI Library
//!
//! Configuration, diagnostics and the commands behind the `terp` binary.

pub mod cli;
pub mod commands;
pub mod diagnostics;

// Re-export core types for convenience
pub use smol_core::*;
pub use smol_interpret::Interpreter;

// CLI-specific error handling
pub mod error {
    use smol_core::error::SmoltalkError;
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum CliError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Configuration error: {0}")]
        Config(String),

        #[error("Line editor error: {0}")]
        Readline(#[from] rustyline::error::ReadlineError),

        #[error(transparent)]
        Evaluation(#[from] SmoltalkError),
    }

    pub type Result<T> = std::result::Result<T, CliError>;
}

pub use error::{CliError, Result};
