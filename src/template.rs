//! Assembly of captured application bodies into standalone source files
//!
//! A captured body carries sentinel marker lines where documentation content
//! and excluded code used to be. Assembly joins the package header, the
//! collected imports and the body into one compilable file and deletes the
//! marker lines as its final step.

use crate::sentinel;

/// Build a standalone program: package header, imports, body
pub fn assemble_program(package_header: &str, imports: &[String], body: &str) -> String {
    let mut sections: Vec<String> = Vec::new();
    if !package_header.is_empty() {
        sections.push(package_header.to_string());
    }
    if !imports.is_empty() {
        sections.push(imports.join("\n"));
    }
    sections.push(body.to_string());
    let mut out = sections.join("\n\n");
    out.push('\n');
    sentinel::strip_marked_lines(&out)
}
