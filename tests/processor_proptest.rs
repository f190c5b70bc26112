//! Property-based tests for the processor using generated annotated sources
//!
//! These tests build small but structurally varied annotated sources and
//! check what must hold for every input. Output counts line up with the
//! annotations present, no sentinel marker escapes into any output, and
//! each extracted program is itself parseable.

use dokweave::kotlin::parse;
use dokweave::process;
use dokweave::sentinel::MARKER;
use proptest::prelude::*;

#[cfg(test)]
mod property_tests {
    use super::*;

    /// One annotated top-level section of a generated source
    #[derive(Debug, Clone)]
    enum Section {
        Text(String),
        Code(String),
        Application(String),
        Image(String),
    }

    /// Call names prefixed so they can never collide with a keyword
    fn call_name_strategy() -> impl Strategy<Value = String> {
        "[a-z]{0,8}".prop_map(|suffix| format!("draw{}", suffix))
    }

    fn section_strategy() -> impl Strategy<Value = Section> {
        prop_oneof![
            "[a-z]{1,12}".prop_map(Section::Text),
            call_name_strategy().prop_map(Section::Code),
            call_name_strategy().prop_map(Section::Application),
            "[a-z]{1,12}".prop_map(Section::Image),
        ]
    }

    fn sections_strategy() -> impl Strategy<Value = Vec<Section>> {
        prop::collection::vec(section_strategy(), 0..8)
    }

    fn render_source(sections: &[Section]) -> String {
        let mut out = String::from("import org.openrndr.application\n\n");
        for section in sections {
            match section {
                Section::Text(text) => {
                    out.push_str(&format!("@Text\n\"\"\"\n{}\n\"\"\"\n\n", text));
                }
                Section::Code(name) => {
                    out.push_str(&format!("@Code\n{}()\n\n", name));
                }
                Section::Application(name) => {
                    out.push_str(&format!(
                        "@Application\napplication {{\n    {}()\n}}\n\n",
                        name
                    ));
                }
                Section::Image(stem) => {
                    out.push_str(&format!("@Media.Image\n\"\"\"media/{}.png\"\"\"\n\n", stem));
                }
            }
        }
        out
    }

    proptest! {
        #[test]
        fn test_outputs_line_up_with_the_annotations(sections in sections_strategy()) {
            let source = render_source(&sections);
            let result = process(&source, "package examples.generated", None).unwrap();

            let applications = sections
                .iter()
                .filter(|s| matches!(s, Section::Application(_)))
                .count();
            prop_assert_eq!(result.app_sources.len(), applications);

            let media = sections
                .iter()
                .filter(|s| matches!(s, Section::Image(_)))
                .count();
            prop_assert_eq!(result.media.len(), media);
        }

        #[test]
        fn test_markers_never_escape(sections in sections_strategy()) {
            let source = render_source(&sections);
            let result = process(&source, "package examples.generated", None).unwrap();
            prop_assert!(!result.doc.contains(MARKER));
            for program in &result.app_sources {
                prop_assert!(!program.contains(MARKER));
            }
        }

        #[test]
        fn test_extracted_programs_reparse(sections in sections_strategy()) {
            let source = render_source(&sections);
            let result = process(&source, "package examples.generated", None).unwrap();
            for program in &result.app_sources {
                prop_assert!(parse(program).is_ok(), "program does not parse:\n{}", program);
            }
        }

        #[test]
        fn test_processing_is_deterministic(sections in sections_strategy()) {
            let source = render_source(&sections);
            let first = process(&source, "package examples.generated", None).unwrap();
            let second = process(&source, "package examples.generated", None).unwrap();
            prop_assert_eq!(first.doc, second.doc);
            prop_assert_eq!(first.app_sources, second.app_sources);
            prop_assert_eq!(first.media, second.media);
        }
    }
}
