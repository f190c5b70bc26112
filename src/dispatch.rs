//! Annotation dispatch: the fold hooks that build documents and capture
//! programs
//!
//! The dispatcher is the single consumer of the fold. On entry to a labeled
//! node it walks the node's annotation entries in source order and applies
//! the effect of each recognized label; unrecognized entries are ignored here
//! and survive into printed output. Because entries are visited in order, a
//! node can stack labels: `@Application` followed by `@Code` captures the
//! program first, then appends the code excerpt, then the example link.
//!
//! Captured program bodies are printed from a scrubbed copy of the subtree:
//! recognized labels are removed, documentation string content is blanked
//! with the sentinel marker, and excluded nodes become sentinel leaves. The
//! marker lines are filtered out later, when the program template or the
//! document is rendered. Bodies stored in [`FoldState::applications`] are the
//! raw pre-filter texts.
//!
//! An application stays "open" from its capture until the traversal leaves
//! the same node, tracked by reference identity. Code excerpts emitted while
//! an application is open are followed by a link to the example, numbered by
//! the post-capture count (1 for the first captured application).

use crate::doc::{Doc, Element};
use crate::error::ProcessError;
use crate::fold::{Node, Step, TreeFold};
use crate::kotlin::ast::*;
use crate::kotlin::printer;
use crate::labels::{self, Label};
use crate::sentinel;

/// Builds the link target for the n-th captured application (1-based)
pub type LinkBuilder = dyn Fn(usize) -> String;

/// Accumulator threaded through the fold
#[derive(Debug, Default)]
pub struct FoldState<'t> {
    /// Document elements in source order
    pub doc: Doc,
    /// Captured program bodies, pre-filter, in capture order
    pub applications: Vec<String>,
    /// Printed import lines outside the annotation namespace, in source order
    pub imports: Vec<String>,
    current_application: Option<Node<'t>>,
}

impl<'t> FoldState<'t> {
    pub fn new() -> FoldState<'t> {
        FoldState::default()
    }
}

/// The fold hooks implementing per-label behavior
pub struct Dispatcher<'a> {
    link_builder: Option<&'a LinkBuilder>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(link_builder: Option<&'a LinkBuilder>) -> Dispatcher<'a> {
        Dispatcher { link_builder }
    }

    fn apply_labels<'t>(
        &self,
        mut state: FoldState<'t>,
        node: Node<'t>,
        labeled: Labeled<'t>,
    ) -> Result<Step<FoldState<'t>>, ProcessError> {
        // Exclude silences every other label stacked on the node
        if has_label(labeled.entries(), Label::Exclude) {
            return Ok(Step::skip(state));
        }
        for entry in labeled.entries() {
            let label = match labels::recognize(&entry.dotted_name()) {
                Some(label) => label,
                None => continue,
            };
            match label {
                Label::Application => {
                    state.applications.push(print_program(&labeled));
                    state.current_application = Some(node);
                }
                Label::Text => {
                    let template = string_value(&labeled, label)?;
                    state
                        .doc
                        .push(Element::Markdown(trim_indent(&template.rendered())));
                }
                Label::Code => {
                    state.doc.push(Element::Code(print_excerpt(&labeled)));
                    self.push_link(&mut state);
                }
                Label::CodeBlock => {
                    let text = code_block_text(&labeled)?;
                    state.doc.push(Element::Code(text));
                    self.push_link(&mut state);
                }
                Label::MediaImage => {
                    let template = string_value(&labeled, label)?;
                    state
                        .doc
                        .push(Element::Image(template.rendered().trim().to_string()));
                }
                Label::MediaVideo => {
                    let template = string_value(&labeled, label)?;
                    state
                        .doc
                        .push(Element::Video(template.rendered().trim().to_string()));
                }
                Label::Exclude => {}
            }
        }
        Ok(Step::children(state))
    }

    fn push_link(&self, state: &mut FoldState<'_>) {
        if state.current_application.is_none() {
            return;
        }
        if let Some(make_link) = self.link_builder {
            let url = make_link(state.applications.len());
            state
                .doc
                .push(Element::Markdown(format!("[Link to the full example]({})", url)));
        }
    }
}

impl<'t, 'a> TreeFold<'t> for Dispatcher<'a> {
    type State = FoldState<'t>;
    type Error = ProcessError;

    fn enter(
        &mut self,
        mut state: FoldState<'t>,
        node: Node<'t>,
    ) -> Result<Step<FoldState<'t>>, ProcessError> {
        match node {
            Node::Import(import) => {
                if !import.references(labels::ANNOTATIONS_SEGMENT) {
                    state.imports.push(printer::print_import(import));
                }
                Ok(Step::children(state))
            }
            Node::Statement(Statement::Declaration(declaration)) => {
                self.apply_labels(state, node, Labeled::Declaration(declaration))
            }
            Node::Expr(Expr::Annotated(annotated)) => {
                self.apply_labels(state, node, Labeled::Expression(annotated))
            }
            _ => Ok(Step::children(state)),
        }
    }

    fn leave(
        &mut self,
        mut state: FoldState<'t>,
        node: Node<'t>,
    ) -> Result<FoldState<'t>, ProcessError> {
        if let Some(open) = state.current_application {
            if open.same(&node) {
                state.current_application = None;
            }
        }
        Ok(state)
    }
}

/// A node carrying annotations, in either grammatical position
enum Labeled<'t> {
    Declaration(&'t Declaration),
    Expression(&'t Annotated),
}

impl<'t> Labeled<'t> {
    fn entries(&self) -> &'t [AnnotationEntry] {
        match self {
            Labeled::Declaration(d) => d.annotations(),
            Labeled::Expression(a) => &a.annotations,
        }
    }
}

// ============================================================================
// Label helpers
// ============================================================================

fn recognized(entry: &AnnotationEntry) -> Option<Label> {
    labels::recognize(&entry.dotted_name())
}

fn has_label(entries: &[AnnotationEntry], label: Label) -> bool {
    entries.iter().any(|e| recognized(e) == Some(label))
}

fn has_doc_label(entries: &[AnnotationEntry]) -> bool {
    entries.iter().any(|e| {
        matches!(
            recognized(e),
            Some(Label::Text | Label::MediaImage | Label::MediaVideo)
        )
    })
}

fn keep_unrecognized(entries: &[AnnotationEntry]) -> Vec<AnnotationEntry> {
    entries
        .iter()
        .filter(|e| recognized(e).is_none())
        .cloned()
        .collect()
}

/// The string template a value-consuming label requires on its node
fn string_value<'t>(
    labeled: &Labeled<'t>,
    label: Label,
) -> Result<&'t StringTemplate, ProcessError> {
    let non_literal = |found: &str| ProcessError::NonLiteralExpression {
        label: label.to_string(),
        found: found.to_string(),
    };
    match labeled {
        Labeled::Expression(annotated) => match annotated.expr.as_ref() {
            Expr::StringTemplate(template) => Ok(template),
            other => Err(non_literal(other.kind_name())),
        },
        Labeled::Declaration(Declaration::Property(property)) => match &property.initializer {
            Some(Expr::StringTemplate(template)) => Ok(template),
            Some(other) => Err(non_literal(other.kind_name())),
            None => Err(non_literal("property without initializer")),
        },
        Labeled::Declaration(Declaration::Function(_)) => Err(non_literal("function declaration")),
    }
}

/// The printed statements of a `run { ... }` block
fn code_block_text(labeled: &Labeled<'_>) -> Result<String, ProcessError> {
    let invalid = |found: String| ProcessError::InvalidCodeBlockTarget { found };
    let annotated = match labeled {
        Labeled::Expression(annotated) => annotated,
        Labeled::Declaration(declaration) => {
            return Err(invalid(declaration.kind_name().to_string()))
        }
    };
    let call = match annotated.expr.as_ref() {
        Expr::Call(call) => call,
        other => return Err(invalid(other.kind_name().to_string())),
    };
    match call.callee.as_ref() {
        Expr::Name(name) if name == "run" => {}
        Expr::Name(name) => return Err(invalid(format!("a call to '{}'", name))),
        other => return Err(invalid(format!("a call to a {}", other.kind_name()))),
    }
    let lambda = match &call.lambda {
        Some(lambda) => lambda,
        None => return Err(invalid("a 'run' call without a trailing lambda".to_string())),
    };
    let text = lambda
        .body
        .iter()
        .map(|statement| printer::print_statement(&scrub_statement(statement, Scrub::Excerpt)))
        .collect::<Vec<String>>()
        .join("\n");
    Ok(text)
}

fn print_program(labeled: &Labeled<'_>) -> String {
    match labeled {
        Labeled::Declaration(declaration) => printer::print_statement(&Statement::Declaration(
            scrub_declaration(declaration, Scrub::Program),
        )),
        Labeled::Expression(annotated) => {
            printer::print_expr(&scrub_annotated(annotated, Scrub::Program))
        }
    }
}

fn print_excerpt(labeled: &Labeled<'_>) -> String {
    match labeled {
        Labeled::Declaration(declaration) => printer::print_statement(&Statement::Declaration(
            scrub_declaration(declaration, Scrub::Excerpt),
        )),
        Labeled::Expression(annotated) => {
            printer::print_expr(&scrub_annotated(annotated, Scrub::Excerpt))
        }
    }
}

// ============================================================================
// Scrubbing: copies prepared for printing
// ============================================================================

/// How a subtree is prepared before printing
#[derive(Debug, Clone, Copy, PartialEq)]
enum Scrub {
    /// Program body: strip recognized labels, blank documentation string
    /// content, replace excluded nodes with sentinels
    Program,
    /// Documentation excerpt: strip recognized labels and replace excluded
    /// nodes, but keep string content
    Excerpt,
}

fn scrub_statement(statement: &Statement, mode: Scrub) -> Statement {
    match statement {
        Statement::Declaration(declaration) => {
            Statement::Declaration(scrub_declaration(declaration, mode))
        }
        Statement::Expression(expr) => Statement::Expression(scrub_expr(expr, mode)),
        Statement::For(f) => Statement::For(ForLoop {
            binding: f.binding.clone(),
            iterable: scrub_expr(&f.iterable, mode),
            body: scrub_statements(&f.body, mode),
        }),
        Statement::While(w) => Statement::While(WhileLoop {
            condition: scrub_expr(&w.condition, mode),
            body: scrub_statements(&w.body, mode),
        }),
        Statement::Return(value) => {
            Statement::Return(value.as_ref().map(|expr| scrub_expr(expr, mode)))
        }
        Statement::Comment(text) => Statement::Comment(text.clone()),
    }
}

fn scrub_statements(statements: &[Statement], mode: Scrub) -> Vec<Statement> {
    statements
        .iter()
        .map(|statement| scrub_statement(statement, mode))
        .collect()
}

fn scrub_declaration(declaration: &Declaration, mode: Scrub) -> Declaration {
    let entries = declaration.annotations();
    if has_label(entries, Label::Exclude) {
        return sentinel::marker_declaration();
    }
    let blank = mode == Scrub::Program && has_doc_label(entries);
    match declaration.with_annotations(keep_unrecognized(entries)) {
        Declaration::Function(mut function) => {
            function.params = function
                .params
                .into_iter()
                .map(|mut param| {
                    param.default = param.default.map(|d| scrub_expr(&d, mode));
                    param
                })
                .collect();
            function.body = match &function.body {
                FunctionBody::Block(statements) => {
                    FunctionBody::Block(scrub_statements(statements, mode))
                }
                FunctionBody::Expression(expr) => {
                    FunctionBody::Expression(Box::new(scrub_expr(expr, mode)))
                }
            };
            Declaration::Function(function)
        }
        Declaration::Property(mut property) => {
            property.initializer = if blank {
                Some(sentinel::marker_expression())
            } else {
                property
                    .initializer
                    .as_ref()
                    .map(|expr| scrub_expr(expr, mode))
            };
            Declaration::Property(property)
        }
    }
}

fn scrub_annotated(annotated: &Annotated, mode: Scrub) -> Expr {
    let entries = &annotated.annotations;
    if has_label(entries, Label::Exclude) {
        return sentinel::marker_expression();
    }
    let kept = keep_unrecognized(entries);
    let inner = if mode == Scrub::Program && has_doc_label(entries) {
        sentinel::marker_expression()
    } else {
        scrub_expr(&annotated.expr, mode)
    };
    Expr::annotated(kept, inner)
}

fn scrub_expr(expr: &Expr, mode: Scrub) -> Expr {
    match expr {
        Expr::Annotated(annotated) => scrub_annotated(annotated, mode),
        Expr::Call(call) => Expr::Call(Call {
            callee: Box::new(scrub_expr(&call.callee, mode)),
            args: call
                .args
                .iter()
                .map(|arg| Argument {
                    name: arg.name.clone(),
                    value: scrub_expr(&arg.value, mode),
                })
                .collect(),
            lambda: call.lambda.as_ref().map(|lambda| scrub_lambda(lambda, mode)),
        }),
        Expr::Unary(unary) => Expr::Unary(Unary {
            op: unary.op,
            expr: Box::new(scrub_expr(&unary.expr, mode)),
        }),
        Expr::Binary(binary) => Expr::Binary(Binary {
            lhs: Box::new(scrub_expr(&binary.lhs, mode)),
            op: binary.op.clone(),
            rhs: Box::new(scrub_expr(&binary.rhs, mode)),
        }),
        Expr::Member(member) => Expr::Member(Member {
            receiver: Box::new(scrub_expr(&member.receiver, mode)),
            name: member.name.clone(),
        }),
        Expr::Index(index) => Expr::Index(IndexAccess {
            receiver: Box::new(scrub_expr(&index.receiver, mode)),
            index: Box::new(scrub_expr(&index.index, mode)),
        }),
        Expr::Paren(inner) => Expr::Paren(Box::new(scrub_expr(inner, mode))),
        Expr::If(if_expr) => Expr::If(scrub_if(if_expr, mode)),
        Expr::Lambda(lambda) => Expr::Lambda(scrub_lambda(lambda, mode)),
        Expr::StringTemplate(_) | Expr::Name(_) | Expr::Literal(_) => expr.clone(),
    }
}

fn scrub_lambda(lambda: &Lambda, mode: Scrub) -> Lambda {
    Lambda {
        params: lambda.params.clone(),
        body: scrub_statements(&lambda.body, mode),
    }
}

fn scrub_if(if_expr: &IfExpr, mode: Scrub) -> IfExpr {
    IfExpr {
        condition: Box::new(scrub_expr(&if_expr.condition, mode)),
        then_block: scrub_statements(&if_expr.then_block, mode),
        else_branch: if_expr.else_branch.as_ref().map(|branch| match branch {
            ElseBranch::Block(statements) => ElseBranch::Block(scrub_statements(statements, mode)),
            ElseBranch::If(nested) => ElseBranch::If(Box::new(scrub_if(nested, mode))),
        }),
    }
}

/// Kotlin-style indent trimming for documentation text: drop a blank first
/// and last line, then remove the common leading whitespace. The indent is
/// counted in characters, not bytes; whitespace may be multi-byte.
fn trim_indent(text: &str) -> String {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.first().map_or(false, |l| l.trim().is_empty()) {
        lines.remove(0);
    }
    if lines.last().map_or(false, |l| l.trim().is_empty()) {
        lines.pop();
    }
    let min_indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                ""
            } else {
                match l.char_indices().nth(min_indent) {
                    Some((start, _)) => &l[start..],
                    None => "",
                }
            }
        })
        .collect::<Vec<&str>>()
        .join("\n")
}
