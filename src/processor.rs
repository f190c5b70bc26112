//! Processing entry point: annotated source in, document and programs out
//!
//! [`process`] is the pure core of the tool. It parses one source text, runs
//! the annotation dispatch fold over it, renders the document and assembles
//! every captured application into a standalone program. No file system
//! access happens here; the pipeline layer owns discovery and writing.

use crate::dispatch::{Dispatcher, FoldState, LinkBuilder};
use crate::doc;
use crate::error::ProcessError;
use crate::fold::fold_file;
use crate::kotlin::parse;
use crate::template;
use serde::Serialize;

/// Everything produced from one source file
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResult {
    /// Rendered markdown document
    pub doc: String,
    /// Standalone program texts, one per captured application, in capture
    /// order
    pub app_sources: Vec<String>,
    /// Media paths referenced by the document, in document order
    pub media: Vec<String>,
}

/// Process one source text with the default code fence language
pub fn process(
    source: &str,
    package_header: &str,
    link_builder: Option<&LinkBuilder>,
) -> Result<ProcessResult, ProcessError> {
    process_with_language(source, package_header, link_builder, doc::DEFAULT_LANGUAGE_TAG)
}

/// Process one source text, tagging code fences with `language_tag`
pub fn process_with_language(
    source: &str,
    package_header: &str,
    link_builder: Option<&LinkBuilder>,
    language_tag: &str,
) -> Result<ProcessResult, ProcessError> {
    let file = parse(source)?;
    let mut dispatcher = Dispatcher::new(link_builder);
    let state = fold_file(&file, FoldState::new(), &mut dispatcher)?;
    let doc = doc::render(&state.doc, language_tag);
    let app_sources = state
        .applications
        .iter()
        .map(|body| template::assemble_program(package_header, &state.imports, body))
        .collect();
    let media = state.doc.media_paths();
    Ok(ProcessResult {
        doc,
        app_sources,
        media,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = concat!(
        "import org.openrndr.application\n",
        "import org.openrndr.dokweave.annotations.*\n",
        "\n",
        "@Text\n",
        "\"\"\"\n",
        "# Drawing a circle\n",
        "\"\"\"\n",
        "\n",
        "@Application\n",
        "application {\n",
        "    @Code\n",
        "    extend {\n",
        "        drawer.circle(100.0, 100.0, 50.0)\n",
        "    }\n",
        "}\n",
    );

    #[test]
    fn test_document_and_program_from_one_source() {
        let result = process(SAMPLE, "package examples.circle", None).unwrap();
        insta::assert_snapshot!(result.doc, @r###"
        # Drawing a circle

        ```kotlin
        extend {
            drawer.circle(100.0, 100.0, 50.0)
        }
        ```
        "###);
        assert_eq!(result.app_sources.len(), 1);
        insta::assert_snapshot!(result.app_sources[0], @r###"
        package examples.circle

        import org.openrndr.application

        application {
            extend {
                drawer.circle(100.0, 100.0, 50.0)
            }
        }
        "###);
        assert!(result.media.is_empty());
    }

    #[test]
    fn test_language_tag_controls_fences() {
        let result =
            process_with_language("@Code\nrender()\n", "package x", None, "text").unwrap();
        assert_eq!(result.doc, "```text\nrender()\n```");
    }

    #[test]
    fn test_media_paths_in_document_order() {
        let source = concat!(
            "@Media.Video\n\"\"\"media/clip.mp4\"\"\"\n",
            "@Media.Image\n\"\"\"media/shot.png\"\"\"\n",
        );
        let result = process(source, "package x", None).unwrap();
        assert_eq!(result.media, vec!["media/clip.mp4", "media/shot.png"]);
    }

    #[test]
    fn test_parse_failure_surfaces_position() {
        let err = process("val x = \n", "package x", None).unwrap_err();
        assert!(err.to_string().starts_with("parse error at"));
    }

    #[test]
    fn test_empty_source_produces_empty_outputs() {
        let result = process("", "package x", None).unwrap();
        assert_eq!(result.doc, "");
        assert!(result.app_sources.is_empty());
        assert!(result.media.is_empty());
    }
}
