//! Deterministic source printer for the accepted Kotlin subset
//!
//! Prints AST nodes back to source text with a fixed layout: four-space
//! indentation, one statement per line, annotations on their own lines.
//! The same tree always prints to the same text, which is what makes
//! extracted program sources and documentation excerpts reproducible.
//!
//! The printer never inserts grouping parentheses; explicit parentheses
//! survive parsing as [`Expr::Paren`] nodes and print back as written.
//! String template segments are emitted verbatim, so escape sequences and
//! interpolation markers round-trip untouched.

use crate::kotlin::ast::*;

const INDENT_UNIT: &str = "    ";

/// Print a whole file: package header, imports, then statements
pub fn print_file(file: &KtFile) -> String {
    let mut out = String::new();
    if let Some(package) = &file.package {
        out.push_str("package ");
        out.push_str(&package.path.join("."));
        out.push('\n');
    }
    if !file.imports.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        for import in &file.imports {
            out.push_str(&print_import(import));
            out.push('\n');
        }
    }
    if !file.statements.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        for statement in &file.statements {
            write_statement(&mut out, statement, 0);
        }
    }
    out
}

pub fn print_import(import: &Import) -> String {
    let mut out = String::from("import ");
    out.push_str(&import.path.join("."));
    if import.wildcard {
        out.push_str(".*");
    }
    out
}

/// Print a single statement at the left margin, without a trailing newline
pub fn print_statement(statement: &Statement) -> String {
    let mut out = String::new();
    write_statement(&mut out, statement, 0);
    if out.ends_with('\n') {
        out.pop();
    }
    out
}

/// Print a single expression at the left margin
pub fn print_expr(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr, 0);
    out
}

fn push_indent(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push_str(INDENT_UNIT);
    }
}

fn write_statement(out: &mut String, statement: &Statement, indent: usize) {
    push_indent(out, indent);
    match statement {
        Statement::Declaration(Declaration::Function(function)) => {
            write_function(out, function, indent);
        }
        Statement::Declaration(Declaration::Property(property)) => {
            write_property(out, property, indent);
        }
        Statement::Expression(expr) => {
            write_expr(out, expr, indent);
        }
        Statement::For(f) => {
            out.push_str("for (");
            out.push_str(&f.binding);
            out.push_str(" in ");
            write_expr(out, &f.iterable, indent);
            out.push_str(") ");
            write_block(out, &f.body, indent);
        }
        Statement::While(w) => {
            out.push_str("while (");
            write_expr(out, &w.condition, indent);
            out.push_str(") ");
            write_block(out, &w.body, indent);
        }
        Statement::Return(value) => {
            out.push_str("return");
            if let Some(expr) = value {
                out.push(' ');
                write_expr(out, expr, indent);
            }
        }
        Statement::Comment(text) => {
            out.push_str(text);
        }
    }
    out.push('\n');
}

fn write_annotations(out: &mut String, annotations: &[AnnotationEntry], indent: usize) {
    for entry in annotations {
        write_annotation(out, entry, indent);
        out.push('\n');
        push_indent(out, indent);
    }
}

fn write_annotation(out: &mut String, entry: &AnnotationEntry, indent: usize) {
    out.push('@');
    out.push_str(&entry.names.join("."));
    if !entry.args.is_empty() {
        out.push('(');
        write_arguments(out, &entry.args, indent);
        out.push(')');
    }
}

fn write_function(out: &mut String, function: &Function, indent: usize) {
    write_annotations(out, &function.annotations, indent);
    for modifier in &function.modifiers {
        out.push_str(modifier);
        out.push(' ');
    }
    out.push_str("fun ");
    out.push_str(&function.name);
    out.push('(');
    for (i, param) in function.params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&param.name);
        out.push_str(": ");
        write_type(out, &param.ty);
        if let Some(default) = &param.default {
            out.push_str(" = ");
            write_expr(out, default, indent);
        }
    }
    out.push(')');
    if let Some(ty) = &function.return_type {
        out.push_str(": ");
        write_type(out, ty);
    }
    match &function.body {
        FunctionBody::Block(statements) => {
            out.push(' ');
            write_block(out, statements, indent);
        }
        FunctionBody::Expression(expr) => {
            out.push_str(" = ");
            write_expr(out, expr, indent);
        }
    }
}

fn write_property(out: &mut String, property: &Property, indent: usize) {
    write_annotations(out, &property.annotations, indent);
    for modifier in &property.modifiers {
        out.push_str(modifier);
        out.push(' ');
    }
    out.push_str(if property.mutable { "var" } else { "val" });
    out.push(' ');
    out.push_str(&property.name);
    if let Some(ty) = &property.ty {
        out.push_str(": ");
        write_type(out, ty);
    }
    if let Some(initializer) = &property.initializer {
        out.push_str(" = ");
        write_expr(out, initializer, indent);
    }
}

fn write_type(out: &mut String, ty: &TypeRef) {
    out.push_str(&ty.names.join("."));
    if !ty.args.is_empty() {
        out.push('<');
        for (i, arg) in ty.args.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_type(out, arg);
        }
        out.push('>');
    }
    if ty.nullable {
        out.push('?');
    }
}

fn write_block(out: &mut String, statements: &[Statement], indent: usize) {
    out.push_str("{\n");
    for statement in statements {
        write_statement(out, statement, indent + 1);
    }
    push_indent(out, indent);
    out.push('}');
}

fn write_expr(out: &mut String, expr: &Expr, indent: usize) {
    match expr {
        Expr::Annotated(annotated) => {
            write_annotations(out, &annotated.annotations, indent);
            write_expr(out, &annotated.expr, indent);
        }
        Expr::StringTemplate(template) => {
            let quote = if template.raw { "\"\"\"" } else { "\"" };
            out.push_str(quote);
            for segment in &template.segments {
                match segment {
                    TemplateSegment::Literal(text) => out.push_str(text),
                    TemplateSegment::Interpolation(text) => out.push_str(text),
                }
            }
            out.push_str(quote);
        }
        Expr::Call(call) => {
            write_expr(out, &call.callee, indent);
            if !(call.args.is_empty() && call.lambda.is_some()) {
                out.push('(');
                write_arguments(out, &call.args, indent);
                out.push(')');
            }
            if let Some(lambda) = &call.lambda {
                out.push(' ');
                write_lambda(out, lambda, indent);
            }
        }
        Expr::Name(name) => {
            out.push_str(name);
        }
        Expr::Literal(literal) => match literal {
            Literal::Number(text) => out.push_str(text),
            Literal::Boolean(true) => out.push_str("true"),
            Literal::Boolean(false) => out.push_str("false"),
            Literal::Char(text) => out.push_str(text),
            Literal::Null => out.push_str("null"),
        },
        Expr::Unary(unary) => {
            out.push(match unary.op {
                UnaryOp::Neg => '-',
                UnaryOp::Not => '!',
            });
            write_expr(out, &unary.expr, indent);
        }
        Expr::Binary(binary) => {
            write_expr(out, &binary.lhs, indent);
            write_binary_op(out, &binary.op);
            write_expr(out, &binary.rhs, indent);
        }
        Expr::Member(member) => {
            write_expr(out, &member.receiver, indent);
            out.push('.');
            out.push_str(&member.name);
        }
        Expr::Index(index) => {
            write_expr(out, &index.receiver, indent);
            out.push('[');
            write_expr(out, &index.index, indent);
            out.push(']');
        }
        Expr::Paren(inner) => {
            out.push('(');
            write_expr(out, inner, indent);
            out.push(')');
        }
        Expr::If(if_expr) => {
            write_if(out, if_expr, indent);
        }
        Expr::Lambda(lambda) => {
            write_lambda(out, lambda, indent);
        }
    }
}

fn write_arguments(out: &mut String, args: &[Argument], indent: usize) {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if let Some(name) = &arg.name {
            out.push_str(name);
            out.push_str(" = ");
        }
        write_expr(out, &arg.value, indent);
    }
}

fn write_lambda(out: &mut String, lambda: &Lambda, indent: usize) {
    out.push('{');
    if !lambda.params.is_empty() {
        out.push(' ');
        out.push_str(&lambda.params.join(", "));
        out.push_str(" ->");
    }
    out.push('\n');
    for statement in &lambda.body {
        write_statement(out, statement, indent + 1);
    }
    push_indent(out, indent);
    out.push('}');
}

fn write_if(out: &mut String, if_expr: &IfExpr, indent: usize) {
    out.push_str("if (");
    write_expr(out, &if_expr.condition, indent);
    out.push_str(") ");
    write_block(out, &if_expr.then_block, indent);
    if let Some(else_branch) = &if_expr.else_branch {
        out.push_str(" else ");
        match else_branch {
            ElseBranch::Block(statements) => write_block(out, statements, indent),
            ElseBranch::If(nested) => write_if(out, nested, indent),
        }
    }
}

fn write_binary_op(out: &mut String, op: &BinaryOp) {
    let text = match op {
        BinaryOp::Add => " + ",
        BinaryOp::Sub => " - ",
        BinaryOp::Mul => " * ",
        BinaryOp::Div => " / ",
        BinaryOp::Rem => " % ",
        BinaryOp::Eq => " == ",
        BinaryOp::Ne => " != ",
        BinaryOp::Lt => " < ",
        BinaryOp::Le => " <= ",
        BinaryOp::Gt => " > ",
        BinaryOp::Ge => " >= ",
        BinaryOp::And => " && ",
        BinaryOp::Or => " || ",
        BinaryOp::Range => "..",
        BinaryOp::Assign => " = ",
        BinaryOp::PlusAssign => " += ",
        BinaryOp::MinusAssign => " -= ",
        BinaryOp::Infix(name) => {
            out.push(' ');
            out.push_str(name);
            out.push(' ');
            return;
        }
    };
    out.push_str(text);
}
