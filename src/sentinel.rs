//! Sentinel replacement for excluded and blanked content
//!
//! Deleting a subtree outright can leave its parent ungrammatical: a call
//! losing an argument changes arity, a property losing its initializer stops
//! parsing. Exclusion therefore happens in two steps. First the subtree is
//! replaced with a sentinel leaf of the same grammatical category, built
//! around a reserved marker string. Second, after printing, every line that
//! contains the marker is deleted from the text. The marker never occurs in
//! real sources, so the filter removes exactly the planted lines.

use crate::kotlin::ast::{Declaration, Expr, Property, StringTemplate};

/// Reserved marker; no naturally occurring source line contains it
pub const MARKER: &str = "__DOKWEAVE_STRIP_MARKER__";

/// A raw string template holding only the marker
pub fn marker_template() -> StringTemplate {
    StringTemplate::from_literal(true, MARKER)
}

/// Sentinel for an expression slot
pub fn marker_expression() -> Expr {
    Expr::StringTemplate(marker_template())
}

/// Sentinel for a declaration slot
pub fn marker_declaration() -> Declaration {
    Declaration::Property(Property {
        annotations: Vec::new(),
        modifiers: Vec::new(),
        mutable: false,
        name: "removed".to_string(),
        ty: None,
        initializer: Some(marker_expression()),
    })
}

/// Delete every line that contains the marker
pub fn strip_marked_lines(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.contains(MARKER))
        .collect::<Vec<&str>>()
        .join("\n")
}
