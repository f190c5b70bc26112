//! Token definitions for the accepted Kotlin subset
//!
//! This module defines all the tokens that can be produced by the Kotlin lexer.
//! The tokens are defined using the logos derive macro for efficient tokenization.
//!
//! The lexer keeps more information than a typical compiler front end would:
//! string templates and line comments are captured as single tokens with their
//! verbatim source text, because the processing stages re-emit source text and
//! must not lose or normalize any characters. Interpolation inside string
//! templates (`$name`, `${expr}`) stays inside the string token and is split
//! into segments later, by the parser.
//!
//! Newlines are real tokens rather than skipped trivia: Kotlin statement
//! boundaries are newline-sensitive, and the parser needs them to decide where
//! an expression ends.

use logos::Logos;
use std::fmt;

/// All possible tokens in the accepted Kotlin subset
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
pub enum Token {
    // Keywords
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("fun")]
    Fun,
    #[token("val")]
    Val,
    #[token("var")]
    Var,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("in")]
    In,
    #[token("return")]
    Return,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // Annotation marker
    #[token("@")]
    At,

    // Delimiters
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token("->")]
    Arrow,
    #[token("?")]
    Question,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,
    #[token("=")]
    Eq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,

    // Line breaks (significant for statement termination)
    #[token("\n")]
    Newline,

    // Literals, captured verbatim so printing can reproduce them exactly
    #[regex(r"0[xX][0-9a-fA-F]+|[0-9]+(\.[0-9]+)?[LfF]?", |lex| lex.slice().to_string())]
    Number(String),
    // Triple-quoted raw string; content may span lines and contain single or
    // double quote runs, but not a full closing delimiter
    #[regex(r#""""([^"]|"[^"]|""[^"])*""""#, |lex| lex.slice().to_string())]
    RawStringLit(String),
    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| lex.slice().to_string())]
    StringLit(String),
    #[regex(r"'([^'\\\n]|\\.)'", |lex| lex.slice().to_string())]
    CharLit(String),

    // Comments (kept: standalone line comments survive into printed output)
    #[regex(r"//[^\n]*", |lex| lex.slice().to_string())]
    LineComment(String),

    // Identifiers
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // Catch-all so the parser can report a position instead of silently
    // dropping unexpected characters
    #[regex(r".", |lex| lex.slice().to_string(), priority = 1)]
    Unknown(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Package => write!(f, "'package'"),
            Token::Import => write!(f, "'import'"),
            Token::Fun => write!(f, "'fun'"),
            Token::Val => write!(f, "'val'"),
            Token::Var => write!(f, "'var'"),
            Token::If => write!(f, "'if'"),
            Token::Else => write!(f, "'else'"),
            Token::For => write!(f, "'for'"),
            Token::While => write!(f, "'while'"),
            Token::In => write!(f, "'in'"),
            Token::Return => write!(f, "'return'"),
            Token::True => write!(f, "'true'"),
            Token::False => write!(f, "'false'"),
            Token::Null => write!(f, "'null'"),
            Token::At => write!(f, "'@'"),
            Token::OpenParen => write!(f, "'('"),
            Token::CloseParen => write!(f, "')'"),
            Token::OpenBrace => write!(f, "'{{'"),
            Token::CloseBrace => write!(f, "'}}'"),
            Token::OpenBracket => write!(f, "'['"),
            Token::CloseBracket => write!(f, "']'"),
            Token::Comma => write!(f, "','"),
            Token::Colon => write!(f, "':'"),
            Token::Semicolon => write!(f, "';'"),
            Token::Dot => write!(f, "'.'"),
            Token::DotDot => write!(f, "'..'"),
            Token::Arrow => write!(f, "'->'"),
            Token::Question => write!(f, "'?'"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::Percent => write!(f, "'%'"),
            Token::EqEq => write!(f, "'=='"),
            Token::NotEq => write!(f, "'!='"),
            Token::LtEq => write!(f, "'<='"),
            Token::GtEq => write!(f, "'>='"),
            Token::Lt => write!(f, "'<'"),
            Token::Gt => write!(f, "'>'"),
            Token::AndAnd => write!(f, "'&&'"),
            Token::OrOr => write!(f, "'||'"),
            Token::Bang => write!(f, "'!'"),
            Token::Eq => write!(f, "'='"),
            Token::PlusEq => write!(f, "'+='"),
            Token::MinusEq => write!(f, "'-='"),
            Token::Newline => write!(f, "end of line"),
            Token::Number(text) => write!(f, "number '{}'", text),
            Token::RawStringLit(_) | Token::StringLit(_) => write!(f, "string literal"),
            Token::CharLit(text) => write!(f, "character literal {}", text),
            Token::LineComment(_) => write!(f, "line comment"),
            Token::Ident(name) => write!(f, "identifier '{}'", name),
            Token::Unknown(text) => write!(f, "'{}'", text),
        }
    }
}
