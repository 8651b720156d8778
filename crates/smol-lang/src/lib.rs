//! Smoltalk language front end: the expression scanner and its token model.

pub mod lexer;
pub mod token;

pub use lexer::{scan, tokens_to_source, ScanState};
pub use token::Token;
