//! Kotlin language support: lexer, AST, parser and printer
//!
//! This is a self-contained front end for the subset of Kotlin that annotated
//! documentation sources are written in. The processing stages parse with it,
//! rewrite its trees, and print the results back to source text.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod token;

pub use parser::{parse, ParseError};
