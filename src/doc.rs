//! Ordered document model and markdown rendering
//!
//! A document is the flat sequence of elements appended while walking a
//! source file. Element order is append order, which the traversal guarantees
//! to be source order. Rendering joins the elements with blank lines and then
//! runs the sentinel line filter, so excluded content planted inside code
//! excerpts disappears from the final text.

use crate::sentinel;

/// Fenced code block language tag used when no configuration is in play
pub const DEFAULT_LANGUAGE_TAG: &str = "kotlin";

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Markdown prose, emitted verbatim
    Markdown(String),
    /// A code excerpt, rendered as a fenced block
    Code(String),
    /// An image reference, rendered as an image link
    Image(String),
    /// A video reference, rendered as an inline player
    Video(String),
}

/// An ordered collection of document elements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Doc {
    pub elements: Vec<Element>,
}

impl Doc {
    pub fn new() -> Doc {
        Doc::default()
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Referenced media sources, in document order
    pub fn media_paths(&self) -> Vec<String> {
        self.elements
            .iter()
            .filter_map(|element| match element {
                Element::Image(src) | Element::Video(src) => Some(src.clone()),
                _ => None,
            })
            .collect()
    }
}

/// Render a document to markdown text
pub fn render(doc: &Doc, language_tag: &str) -> String {
    let rendered: Vec<String> = doc
        .elements
        .iter()
        .map(|element| render_element(element, language_tag))
        .collect();
    sentinel::strip_marked_lines(&rendered.join("\n\n"))
}

fn render_element(element: &Element, language_tag: &str) -> String {
    match element {
        Element::Markdown(text) => text.clone(),
        Element::Code(text) => format!("```{}\n{}\n```", language_tag, text),
        Element::Image(src) => format!("![]({})", src),
        Element::Video(src) => format!(
            "<video controls loop><source src=\"{}\" type=\"video/mp4\"></video>",
            src
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements_join_with_blank_lines() {
        let mut doc = Doc::new();
        doc.push(Element::Markdown("# Title".to_string()));
        doc.push(Element::Code("val x = 1".to_string()));
        doc.push(Element::Markdown("after".to_string()));
        insta::assert_snapshot!(render(&doc, "kotlin"), @r###"
# Title

```kotlin
val x = 1
```

after
"###);
    }

    #[test]
    fn test_image_and_video_forms() {
        let mut doc = Doc::new();
        doc.push(Element::Image("media/shot-001.png".to_string()));
        doc.push(Element::Video("media/clip-001.mp4".to_string()));
        assert_eq!(
            render(&doc, "kotlin"),
            "![](media/shot-001.png)\n\n<video controls loop><source src=\"media/clip-001.mp4\" type=\"video/mp4\"></video>"
        );
    }

    #[test]
    fn test_render_strips_sentinel_lines() {
        let mut doc = Doc::new();
        doc.push(Element::Code(format!(
            "run {{\n    \"\"\"{}\"\"\"\n    keep()\n}}",
            sentinel::MARKER
        )));
        assert_eq!(render(&doc, "kotlin"), "```kotlin\nrun {\n    keep()\n}\n```");
    }

    #[test]
    fn test_empty_doc_renders_empty() {
        assert_eq!(render(&Doc::new(), "kotlin"), "");
    }

    #[test]
    fn test_media_paths_in_document_order() {
        let mut doc = Doc::new();
        doc.push(Element::Image("media/a.png".to_string()));
        doc.push(Element::Markdown("text".to_string()));
        doc.push(Element::Video("media/b.mp4".to_string()));
        assert_eq!(doc.media_paths(), vec!["media/a.png", "media/b.mp4"]);
    }

    #[test]
    fn test_language_tag_is_configurable() {
        let mut doc = Doc::new();
        doc.push(Element::Code("let x = 1".to_string()));
        assert!(render(&doc, "swift").starts_with("```swift\n"));
    }
}
