//! Lexer for the accepted Kotlin subset
//!
//! Converts source text into a vector of tokens with their byte spans. The
//! spans index into the original source and are what the parser uses to
//! report line and column positions in errors.

use crate::kotlin::token::Token;
use logos::Logos;

/// Tokenize source text into a vector of (Token, Span) pairs
pub fn tokenize(source: &str) -> Vec<(Token, logos::Span)> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push((token, lexer.span()));
        }
    }

    tokens
}
