//! Recursive descent parser for the accepted Kotlin subset
//!
//! The parser consumes the token vector produced by [`crate::kotlin::lexer`]
//! and builds a [`KtFile`]. It is newline-sensitive the way Kotlin is: an
//! expression ends at a line break unless the break follows a binary operator
//! or precedes a `.` member access, and a trailing lambda only attaches when
//! its `{` sits on the same line as the callee.
//!
//! Errors carry the 1-based line and column of the offending token, computed
//! from the token's byte span.

use crate::kotlin::ast::*;
use crate::kotlin::lexer::tokenize;
use crate::kotlin::token::Token;
use thiserror::Error;

/// Failure to parse a source file, with its position in the input
#[derive(Debug, Clone, PartialEq, Error)]
#[error("parse error at {line}:{column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// Identifiers accepted as declaration modifiers
const MODIFIERS: &[&str] = &[
    "public", "private", "internal", "protected", "open", "override", "inline", "suspend",
    "operator", "tailrec",
];

/// Identifiers accepted as infix functions in binary position
const INFIX_FUNCTIONS: &[&str] = &["to", "until", "downTo", "step"];

/// Parse source text into a file node
pub fn parse(source: &str) -> Result<KtFile, ParseError> {
    let tokens = tokenize(source);
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
    };
    parser.parse_file()
}

struct Parser<'s> {
    source: &'s str,
    tokens: Vec<(Token, logos::Span)>,
    pos: usize,
}

impl<'s> Parser<'s> {
    // ========================================================================
    // Cursor helpers
    // ========================================================================

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn at(&self, token: &Token) -> bool {
        self.peek() == Some(token)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.at(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> Result<(), ParseError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error_here(&format!(
                "expected {}, found {}",
                token,
                self.describe_current()
            )))
        }
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.error_here(&format!(
                "expected identifier, found {}",
                self.describe_current()
            ))),
        }
    }

    /// Skips newlines and semicolons, the statement separators
    fn skip_newlines(&mut self) {
        while matches!(self.peek(), Some(Token::Newline) | Some(Token::Semicolon)) {
            self.pos += 1;
        }
    }

    fn describe_current(&self) -> String {
        match self.peek() {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        }
    }

    fn current_offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, span)| span.start)
            .unwrap_or(self.source.len())
    }

    fn position_of(&self, offset: usize) -> (usize, usize) {
        let mut line = 1;
        let mut column = 1;
        for (i, c) in self.source.char_indices() {
            if i >= offset {
                break;
            }
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    fn error_here(&self, message: &str) -> ParseError {
        self.error_at_offset(self.current_offset(), message)
    }

    fn error_at_offset(&self, offset: usize, message: &str) -> ParseError {
        let (line, column) = self.position_of(offset);
        ParseError {
            message: message.to_string(),
            line,
            column,
        }
    }

    // ========================================================================
    // File structure
    // ========================================================================

    fn parse_file(&mut self) -> Result<KtFile, ParseError> {
        self.skip_newlines();
        let package = if self.at(&Token::Package) {
            Some(self.parse_package()?)
        } else {
            None
        };
        let mut imports = Vec::new();
        loop {
            self.skip_newlines();
            if self.at(&Token::Import) {
                imports.push(self.parse_import()?);
            } else {
                break;
            }
        }
        let mut statements = Vec::new();
        loop {
            self.skip_newlines();
            if self.peek().is_none() {
                break;
            }
            statements.push(self.parse_statement()?);
        }
        Ok(KtFile {
            package,
            imports,
            statements,
        })
    }

    fn parse_package(&mut self) -> Result<PackageHeader, ParseError> {
        self.expect(&Token::Package)?;
        let mut path = vec![self.expect_ident()?];
        while self.eat(&Token::Dot) {
            path.push(self.expect_ident()?);
        }
        Ok(PackageHeader { path })
    }

    fn parse_import(&mut self) -> Result<Import, ParseError> {
        self.expect(&Token::Import)?;
        let mut path = vec![self.expect_ident()?];
        let mut wildcard = false;
        while self.eat(&Token::Dot) {
            if self.eat(&Token::Star) {
                wildcard = true;
                break;
            }
            path.push(self.expect_ident()?);
        }
        Ok(Import { path, wildcard })
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        if let Some(Token::LineComment(text)) = self.peek() {
            let text = text.clone();
            self.pos += 1;
            return Ok(Statement::Comment(text));
        }

        let annotations = self.parse_annotation_entries()?;

        match self.peek() {
            Some(Token::For) if annotations.is_empty() => return self.parse_for(),
            Some(Token::While) if annotations.is_empty() => return self.parse_while(),
            Some(Token::Return) if annotations.is_empty() => return self.parse_return(),
            _ => {}
        }

        // Declarations may start with modifier identifiers; confirm a
        // declaration keyword actually follows before committing
        let checkpoint = self.pos;
        let mut modifiers = Vec::new();
        loop {
            let name = match self.peek() {
                Some(Token::Ident(n)) if MODIFIERS.contains(&n.as_str()) => n.clone(),
                _ => break,
            };
            self.pos += 1;
            modifiers.push(name);
        }
        match self.peek() {
            Some(Token::Fun) => {
                let function = self.parse_function(annotations, modifiers)?;
                return Ok(Statement::Declaration(Declaration::Function(function)));
            }
            Some(Token::Val) | Some(Token::Var) => {
                let property = self.parse_property(annotations, modifiers)?;
                return Ok(Statement::Declaration(Declaration::Property(property)));
            }
            _ => self.pos = checkpoint,
        }

        let expr = self.parse_expr()?;
        if annotations.is_empty() {
            Ok(Statement::Expression(expr))
        } else {
            Ok(Statement::Expression(Expr::Annotated(Annotated {
                annotations,
                expr: Box::new(expr),
            })))
        }
    }

    fn parse_annotation_entries(&mut self) -> Result<Vec<AnnotationEntry>, ParseError> {
        let mut entries = Vec::new();
        while self.at(&Token::At) {
            self.pos += 1;
            let mut names = vec![self.expect_ident()?];
            while self.eat(&Token::Dot) {
                names.push(self.expect_ident()?);
            }
            let args = if self.at(&Token::OpenParen) {
                self.parse_call_args()?
            } else {
                Vec::new()
            };
            entries.push(AnnotationEntry { names, args });
            self.skip_newlines();
        }
        Ok(entries)
    }

    fn parse_function(
        &mut self,
        annotations: Vec<AnnotationEntry>,
        modifiers: Vec<String>,
    ) -> Result<Function, ParseError> {
        self.expect(&Token::Fun)?;
        let name = self.expect_ident()?;
        self.expect(&Token::OpenParen)?;
        self.skip_newlines();
        let mut params = Vec::new();
        if !self.eat(&Token::CloseParen) {
            loop {
                let param_name = self.expect_ident()?;
                self.expect(&Token::Colon)?;
                let ty = self.parse_type()?;
                let default = if self.eat(&Token::Eq) {
                    self.skip_newlines();
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                params.push(Param {
                    name: param_name,
                    ty,
                    default,
                });
                self.skip_newlines();
                if self.eat(&Token::Comma) {
                    self.skip_newlines();
                    if self.eat(&Token::CloseParen) {
                        break;
                    }
                    continue;
                }
                self.expect(&Token::CloseParen)?;
                break;
            }
        }
        let return_type = if self.eat(&Token::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let body = if self.eat(&Token::Eq) {
            self.skip_newlines();
            FunctionBody::Expression(Box::new(self.parse_expr()?))
        } else {
            FunctionBody::Block(self.parse_block()?)
        };
        Ok(Function {
            annotations,
            modifiers,
            name,
            params,
            return_type,
            body,
        })
    }

    fn parse_property(
        &mut self,
        annotations: Vec<AnnotationEntry>,
        modifiers: Vec<String>,
    ) -> Result<Property, ParseError> {
        let mutable = self.eat(&Token::Var);
        if !mutable {
            self.expect(&Token::Val)?;
        }
        let name = self.expect_ident()?;
        let ty = if self.eat(&Token::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let initializer = if self.eat(&Token::Eq) {
            self.skip_newlines();
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Property {
            annotations,
            modifiers,
            mutable,
            name,
            ty,
            initializer,
        })
    }

    fn parse_type(&mut self) -> Result<TypeRef, ParseError> {
        let mut names = vec![self.expect_ident()?];
        while self.eat(&Token::Dot) {
            names.push(self.expect_ident()?);
        }
        let mut args = Vec::new();
        if self.eat(&Token::Lt) {
            loop {
                args.push(self.parse_type()?);
                if self.eat(&Token::Comma) {
                    continue;
                }
                self.expect(&Token::Gt)?;
                break;
            }
        }
        let nullable = self.eat(&Token::Question);
        Ok(TypeRef {
            names,
            args,
            nullable,
        })
    }

    fn parse_for(&mut self) -> Result<Statement, ParseError> {
        self.expect(&Token::For)?;
        self.expect(&Token::OpenParen)?;
        let binding = self.expect_ident()?;
        self.expect(&Token::In)?;
        let iterable = self.parse_expr()?;
        self.expect(&Token::CloseParen)?;
        let body = self.parse_block()?;
        Ok(Statement::For(ForLoop {
            binding,
            iterable,
            body,
        }))
    }

    fn parse_while(&mut self) -> Result<Statement, ParseError> {
        self.expect(&Token::While)?;
        self.expect(&Token::OpenParen)?;
        let condition = self.parse_expr()?;
        self.expect(&Token::CloseParen)?;
        let body = self.parse_block()?;
        Ok(Statement::While(WhileLoop { condition, body }))
    }

    fn parse_return(&mut self) -> Result<Statement, ParseError> {
        self.expect(&Token::Return)?;
        let value = match self.peek() {
            None
            | Some(Token::Newline)
            | Some(Token::Semicolon)
            | Some(Token::CloseBrace) => None,
            _ => Some(self.parse_expr()?),
        };
        Ok(Statement::Return(value))
    }

    fn parse_block(&mut self) -> Result<Vec<Statement>, ParseError> {
        self.expect(&Token::OpenBrace)?;
        self.parse_statements_until_close_brace()
    }

    fn parse_statements_until_close_brace(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();
        loop {
            self.skip_newlines();
            if self.eat(&Token::CloseBrace) {
                return Ok(statements);
            }
            if self.peek().is_none() {
                return Err(self.error_here("expected '}' before end of input"));
            }
            statements.push(self.parse_statement()?);
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_disjunction()?;
        let op = match self.peek() {
            Some(Token::Eq) => BinaryOp::Assign,
            Some(Token::PlusEq) => BinaryOp::PlusAssign,
            Some(Token::MinusEq) => BinaryOp::MinusAssign,
            _ => return Ok(lhs),
        };
        self.pos += 1;
        self.skip_newlines();
        let rhs = self.parse_assignment()?;
        Ok(binary(lhs, op, rhs))
    }

    fn parse_disjunction(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_conjunction()?;
        while self.at(&Token::OrOr) {
            self.pos += 1;
            self.skip_newlines();
            let rhs = self.parse_conjunction()?;
            expr = binary(expr, BinaryOp::Or, rhs);
        }
        Ok(expr)
    }

    fn parse_conjunction(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_equality()?;
        while self.at(&Token::AndAnd) {
            self.pos += 1;
            self.skip_newlines();
            let rhs = self.parse_equality()?;
            expr = binary(expr, BinaryOp::And, rhs);
        }
        Ok(expr)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_comparison()?;
        loop {
            let op = match self.peek() {
                Some(Token::EqEq) => BinaryOp::Eq,
                Some(Token::NotEq) => BinaryOp::Ne,
                _ => break,
            };
            self.pos += 1;
            self.skip_newlines();
            let rhs = self.parse_comparison()?;
            expr = binary(expr, op, rhs);
        }
        Ok(expr)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_infix_function()?;
        loop {
            let op = match self.peek() {
                Some(Token::Lt) => BinaryOp::Lt,
                Some(Token::LtEq) => BinaryOp::Le,
                Some(Token::Gt) => BinaryOp::Gt,
                Some(Token::GtEq) => BinaryOp::Ge,
                _ => break,
            };
            self.pos += 1;
            self.skip_newlines();
            let rhs = self.parse_infix_function()?;
            expr = binary(expr, op, rhs);
        }
        Ok(expr)
    }

    fn parse_infix_function(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_range()?;
        loop {
            let name = match self.peek() {
                Some(Token::Ident(n)) if INFIX_FUNCTIONS.contains(&n.as_str()) => n.clone(),
                _ => break,
            };
            self.pos += 1;
            self.skip_newlines();
            let rhs = self.parse_range()?;
            expr = binary(expr, BinaryOp::Infix(name), rhs);
        }
        Ok(expr)
    }

    fn parse_range(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_additive()?;
        while self.at(&Token::DotDot) {
            self.pos += 1;
            self.skip_newlines();
            let rhs = self.parse_additive()?;
            expr = binary(expr, BinaryOp::Range, rhs);
        }
        Ok(expr)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.pos += 1;
            self.skip_newlines();
            let rhs = self.parse_multiplicative()?;
            expr = binary(expr, op, rhs);
        }
        Ok(expr)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::Percent) => BinaryOp::Rem,
                _ => break,
            };
            self.pos += 1;
            self.skip_newlines();
            let rhs = self.parse_unary()?;
            expr = binary(expr, op, rhs);
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek() {
            Some(Token::Minus) => Some(UnaryOp::Neg),
            Some(Token::Bang) => Some(UnaryOp::Not),
            _ => None,
        };
        if let Some(op) = op {
            self.pos += 1;
            let expr = self.parse_unary()?;
            return Ok(Expr::Unary(Unary {
                op,
                expr: Box::new(expr),
            }));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek() {
                Some(Token::OpenParen) => {
                    let args = self.parse_call_args()?;
                    let lambda = if self.at(&Token::OpenBrace) {
                        Some(self.parse_lambda()?)
                    } else {
                        None
                    };
                    expr = Expr::Call(Call {
                        callee: Box::new(expr),
                        args,
                        lambda,
                    });
                }
                Some(Token::OpenBrace) => {
                    let lambda = self.parse_lambda()?;
                    expr = Expr::Call(Call {
                        callee: Box::new(expr),
                        args: Vec::new(),
                        lambda: Some(lambda),
                    });
                }
                Some(Token::OpenBracket) => {
                    self.pos += 1;
                    self.skip_newlines();
                    let index = self.parse_expr()?;
                    self.skip_newlines();
                    self.expect(&Token::CloseBracket)?;
                    expr = Expr::Index(IndexAccess {
                        receiver: Box::new(expr),
                        index: Box::new(index),
                    });
                }
                Some(Token::Dot) => {
                    self.pos += 1;
                    let name = self.expect_ident()?;
                    expr = Expr::Member(Member {
                        receiver: Box::new(expr),
                        name,
                    });
                }
                _ => {
                    // a member chain may continue after a line break
                    let checkpoint = self.pos;
                    self.skip_newlines();
                    if self.at(&Token::Dot) {
                        continue;
                    }
                    self.pos = checkpoint;
                    break;
                }
            }
        }
        Ok(expr)
    }

    fn parse_call_args(&mut self) -> Result<Vec<Argument>, ParseError> {
        self.expect(&Token::OpenParen)?;
        self.skip_newlines();
        let mut args = Vec::new();
        if self.eat(&Token::CloseParen) {
            return Ok(args);
        }
        loop {
            let name = {
                let checkpoint = self.pos;
                match self.peek() {
                    Some(Token::Ident(n)) => {
                        let n = n.clone();
                        self.pos += 1;
                        if self.eat(&Token::Eq) {
                            self.skip_newlines();
                            Some(n)
                        } else {
                            self.pos = checkpoint;
                            None
                        }
                    }
                    _ => None,
                }
            };
            let value = self.parse_expr()?;
            args.push(Argument { name, value });
            self.skip_newlines();
            if self.eat(&Token::Comma) {
                self.skip_newlines();
                if self.eat(&Token::CloseParen) {
                    break;
                }
                continue;
            }
            self.expect(&Token::CloseParen)?;
            break;
        }
        Ok(args)
    }

    fn parse_lambda(&mut self) -> Result<Lambda, ParseError> {
        self.expect(&Token::OpenBrace)?;
        let checkpoint = self.pos;
        self.skip_newlines();
        let mut params = Vec::new();
        let mut found_arrow = false;
        if matches!(self.peek(), Some(Token::Ident(_))) {
            loop {
                match self.peek() {
                    Some(Token::Ident(n)) => {
                        params.push(n.clone());
                        self.pos += 1;
                    }
                    _ => break,
                }
                if self.eat(&Token::Comma) {
                    continue;
                }
                break;
            }
            if self.eat(&Token::Arrow) {
                found_arrow = true;
            }
        }
        if !found_arrow {
            self.pos = checkpoint;
            params = Vec::new();
        }
        let body = self.parse_statements_until_close_brace()?;
        Ok(Lambda { params, body })
    }

    fn parse_if_expr(&mut self) -> Result<IfExpr, ParseError> {
        self.expect(&Token::If)?;
        self.expect(&Token::OpenParen)?;
        self.skip_newlines();
        let condition = self.parse_expr()?;
        self.skip_newlines();
        self.expect(&Token::CloseParen)?;
        let then_block = self.parse_block()?;
        let checkpoint = self.pos;
        self.skip_newlines();
        let else_branch = if self.eat(&Token::Else) {
            if self.at(&Token::If) {
                Some(ElseBranch::If(Box::new(self.parse_if_expr()?)))
            } else {
                Some(ElseBranch::Block(self.parse_block()?))
            }
        } else {
            self.pos = checkpoint;
            None
        };
        Ok(IfExpr {
            condition: Box::new(condition),
            then_block,
            else_branch,
        })
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = match self.peek() {
            Some(token) => token.clone(),
            None => return Err(self.error_here("expected expression, found end of input")),
        };
        match token {
            Token::Number(text) => {
                self.pos += 1;
                Ok(Expr::Literal(Literal::Number(text)))
            }
            Token::True => {
                self.pos += 1;
                Ok(Expr::Literal(Literal::Boolean(true)))
            }
            Token::False => {
                self.pos += 1;
                Ok(Expr::Literal(Literal::Boolean(false)))
            }
            Token::Null => {
                self.pos += 1;
                Ok(Expr::Literal(Literal::Null))
            }
            Token::CharLit(text) => {
                self.pos += 1;
                Ok(Expr::Literal(Literal::Char(text)))
            }
            Token::StringLit(text) => {
                let offset = self.current_offset();
                self.pos += 1;
                let template = self.scan_template(&text, false, offset)?;
                Ok(Expr::StringTemplate(template))
            }
            Token::RawStringLit(text) => {
                let offset = self.current_offset();
                self.pos += 1;
                let template = self.scan_template(&text, true, offset)?;
                Ok(Expr::StringTemplate(template))
            }
            Token::Ident(name) => {
                self.pos += 1;
                Ok(Expr::Name(name))
            }
            Token::OpenParen => {
                self.pos += 1;
                self.skip_newlines();
                let inner = self.parse_expr()?;
                self.skip_newlines();
                self.expect(&Token::CloseParen)?;
                Ok(Expr::Paren(Box::new(inner)))
            }
            Token::If => Ok(Expr::If(self.parse_if_expr()?)),
            Token::OpenBrace => Ok(Expr::Lambda(self.parse_lambda()?)),
            Token::At => {
                let annotations = self.parse_annotation_entries()?;
                let inner = self.parse_expr()?;
                Ok(Expr::Annotated(Annotated {
                    annotations,
                    expr: Box::new(inner),
                }))
            }
            other => Err(self.error_here(&format!("expected expression, found {}", other))),
        }
    }

    /// Splits string literal content into literal and interpolation segments
    ///
    /// `token_text` is the full token including quotes. Escape sequences and
    /// interpolation syntax are carried verbatim into the segments.
    fn scan_template(
        &self,
        token_text: &str,
        raw: bool,
        offset: usize,
    ) -> Result<StringTemplate, ParseError> {
        let quote = if raw { 3 } else { 1 };
        let content = &token_text[quote..token_text.len() - quote];
        let chars: Vec<char> = content.chars().collect();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if !raw && c == '\\' {
                literal.push(c);
                if i + 1 < chars.len() {
                    literal.push(chars[i + 1]);
                    i += 2;
                } else {
                    i += 1;
                }
                continue;
            }
            if c == '$' && i + 1 < chars.len() {
                let next = chars[i + 1];
                if next == '{' {
                    let mut interp = String::from("${");
                    let mut depth = 1;
                    let mut j = i + 2;
                    while j < chars.len() && depth > 0 {
                        let cj = chars[j];
                        j += 1;
                        interp.push(cj);
                        if cj == '{' {
                            depth += 1;
                        } else if cj == '}' {
                            depth -= 1;
                        }
                    }
                    if depth > 0 {
                        return Err(self.error_at_offset(
                            offset,
                            "unterminated '${' interpolation in string template",
                        ));
                    }
                    flush_literal(&mut literal, &mut segments);
                    segments.push(TemplateSegment::Interpolation(interp));
                    i = j;
                    continue;
                }
                if next.is_ascii_alphabetic() || next == '_' {
                    let mut name = String::from("$");
                    let mut j = i + 1;
                    while j < chars.len() && (chars[j].is_ascii_alphanumeric() || chars[j] == '_') {
                        name.push(chars[j]);
                        j += 1;
                    }
                    flush_literal(&mut literal, &mut segments);
                    segments.push(TemplateSegment::Interpolation(name));
                    i = j;
                    continue;
                }
            }
            literal.push(c);
            i += 1;
        }
        flush_literal(&mut literal, &mut segments);
        Ok(StringTemplate { raw, segments })
    }
}

fn flush_literal(literal: &mut String, segments: &mut Vec<TemplateSegment>) {
    if !literal.is_empty() {
        segments.push(TemplateSegment::Literal(std::mem::take(literal)));
    }
}

fn binary(lhs: Expr, op: BinaryOp, rhs: Expr) -> Expr {
    Expr::Binary(Binary {
        lhs: Box::new(lhs),
        op,
        rhs: Box::new(rhs),
    })
}
