//! Single-pass tree traversal with enter and leave hooks
//!
//! The fold walks a parsed file depth first, visiting children left to right
//! in structural order: a call's callee before its arguments before its
//! trailing lambda body, an if-condition before its then-block before its
//! else-branch. Each node is visited exactly once.
//!
//! State is threaded, not shared: hooks take the accumulator by value and
//! return it, so every mutation is explicit in a signature. The `enter` hook
//! additionally decides whether the node's children are traversed at all;
//! returning [`Descent::Skip`] prunes the subtree. `leave` runs for every
//! node whose `enter` ran, children traversed or not.

use crate::kotlin::ast::{
    Declaration, ElseBranch, Expr, FunctionBody, Import, KtFile, Statement,
};
use std::ptr;

/// Whether to traverse a node's children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent {
    Children,
    Skip,
}

/// Result of an `enter` hook: the threaded state plus the descent decision
pub struct Step<S> {
    pub state: S,
    pub descent: Descent,
}

impl<S> Step<S> {
    pub fn children(state: S) -> Step<S> {
        Step {
            state,
            descent: Descent::Children,
        }
    }

    pub fn skip(state: S) -> Step<S> {
        Step {
            state,
            descent: Descent::Skip,
        }
    }
}

/// A borrowed reference to any node the fold visits
#[derive(Debug, Clone, Copy)]
pub enum Node<'t> {
    Import(&'t Import),
    Statement(&'t Statement),
    Expr(&'t Expr),
}

impl<'t> Node<'t> {
    /// Reference identity: true when both refer to the same tree node
    pub fn same(&self, other: &Node<'t>) -> bool {
        match (self, other) {
            (Node::Import(a), Node::Import(b)) => ptr::eq(*a, *b),
            (Node::Statement(a), Node::Statement(b)) => ptr::eq(*a, *b),
            (Node::Expr(a), Node::Expr(b)) => ptr::eq(*a, *b),
            _ => false,
        }
    }
}

/// Hooks invoked around every visited node
pub trait TreeFold<'t> {
    type State;
    type Error;

    fn enter(&mut self, state: Self::State, node: Node<'t>)
        -> Result<Step<Self::State>, Self::Error>;

    fn leave(&mut self, state: Self::State, node: Node<'t>) -> Result<Self::State, Self::Error>;
}

/// Fold a whole file: imports first, then top-level statements
pub fn fold_file<'t, F>(file: &'t KtFile, state: F::State, fold: &mut F) -> Result<F::State, F::Error>
where
    F: TreeFold<'t>,
{
    let mut state = state;
    for import in &file.imports {
        let node = Node::Import(import);
        let step = fold.enter(state, node)?;
        state = fold.leave(step.state, node)?;
    }
    for statement in &file.statements {
        state = fold_statement(statement, state, fold)?;
    }
    Ok(state)
}

pub fn fold_statement<'t, F>(
    statement: &'t Statement,
    state: F::State,
    fold: &mut F,
) -> Result<F::State, F::Error>
where
    F: TreeFold<'t>,
{
    let node = Node::Statement(statement);
    let step = fold.enter(state, node)?;
    let mut state = step.state;
    if step.descent == Descent::Children {
        match statement {
            Statement::Declaration(Declaration::Function(function)) => {
                for param in &function.params {
                    if let Some(default) = &param.default {
                        state = fold_expr(default, state, fold)?;
                    }
                }
                match &function.body {
                    FunctionBody::Block(statements) => {
                        for inner in statements {
                            state = fold_statement(inner, state, fold)?;
                        }
                    }
                    FunctionBody::Expression(expr) => {
                        state = fold_expr(expr, state, fold)?;
                    }
                }
            }
            Statement::Declaration(Declaration::Property(property)) => {
                if let Some(initializer) = &property.initializer {
                    state = fold_expr(initializer, state, fold)?;
                }
            }
            Statement::Expression(expr) => {
                state = fold_expr(expr, state, fold)?;
            }
            Statement::For(f) => {
                state = fold_expr(&f.iterable, state, fold)?;
                for inner in &f.body {
                    state = fold_statement(inner, state, fold)?;
                }
            }
            Statement::While(w) => {
                state = fold_expr(&w.condition, state, fold)?;
                for inner in &w.body {
                    state = fold_statement(inner, state, fold)?;
                }
            }
            Statement::Return(value) => {
                if let Some(expr) = value {
                    state = fold_expr(expr, state, fold)?;
                }
            }
            Statement::Comment(_) => {}
        }
    }
    fold.leave(state, node)
}

pub fn fold_expr<'t, F>(expr: &'t Expr, state: F::State, fold: &mut F) -> Result<F::State, F::Error>
where
    F: TreeFold<'t>,
{
    let node = Node::Expr(expr);
    let step = fold.enter(state, node)?;
    let mut state = step.state;
    if step.descent == Descent::Children {
        match expr {
            Expr::Annotated(annotated) => {
                state = fold_expr(&annotated.expr, state, fold)?;
            }
            Expr::Call(call) => {
                state = fold_expr(&call.callee, state, fold)?;
                for arg in &call.args {
                    state = fold_expr(&arg.value, state, fold)?;
                }
                if let Some(lambda) = &call.lambda {
                    for inner in &lambda.body {
                        state = fold_statement(inner, state, fold)?;
                    }
                }
            }
            Expr::Unary(unary) => {
                state = fold_expr(&unary.expr, state, fold)?;
            }
            Expr::Binary(binary) => {
                state = fold_expr(&binary.lhs, state, fold)?;
                state = fold_expr(&binary.rhs, state, fold)?;
            }
            Expr::Member(member) => {
                state = fold_expr(&member.receiver, state, fold)?;
            }
            Expr::Index(index) => {
                state = fold_expr(&index.receiver, state, fold)?;
                state = fold_expr(&index.index, state, fold)?;
            }
            Expr::Paren(inner) => {
                state = fold_expr(inner, state, fold)?;
            }
            Expr::If(if_expr) => {
                state = fold_if(if_expr, state, fold)?;
            }
            Expr::Lambda(lambda) => {
                for inner in &lambda.body {
                    state = fold_statement(inner, state, fold)?;
                }
            }
            Expr::StringTemplate(_) | Expr::Name(_) | Expr::Literal(_) => {}
        }
    }
    fold.leave(state, node)
}

fn fold_if<'t, F>(
    if_expr: &'t crate::kotlin::ast::IfExpr,
    state: F::State,
    fold: &mut F,
) -> Result<F::State, F::Error>
where
    F: TreeFold<'t>,
{
    let mut state = fold_expr(&if_expr.condition, state, fold)?;
    for inner in &if_expr.then_block {
        state = fold_statement(inner, state, fold)?;
    }
    match &if_expr.else_branch {
        Some(ElseBranch::Block(statements)) => {
            for inner in statements {
                state = fold_statement(inner, state, fold)?;
            }
        }
        Some(ElseBranch::If(nested)) => {
            state = fold_if(nested, state, fold)?;
        }
        None => {}
    }
    Ok(state)
}
