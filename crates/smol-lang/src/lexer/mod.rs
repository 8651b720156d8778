//! Lexer utilities and tokenization for Smoltalk expressions.

pub mod scanner;
pub mod tokenizer;

pub use scanner::{step, ScanState};
pub use tokenizer::{scan, tokens_to_source};
