//! End-to-end tests for the processor API

use dokweave::error::ProcessError;
use dokweave::kotlin::parse;
use dokweave::sentinel::MARKER;
use dokweave::testing;
use dokweave::{process, ProcessResult};

#[cfg(test)]
mod tests {
    use super::*;

    fn example_links(result: &ProcessResult) -> Vec<&str> {
        result
            .doc
            .lines()
            .filter(|line| line.starts_with("[Link to the full example]"))
            .collect()
    }

    #[test]
    fn test_source_without_annotations_produces_nothing() {
        let source = "import org.openrndr.application\n\nfun main() {\n    println(\"plain\")\n}\n";
        let result = process(source, "package examples.plain", None).unwrap();
        assert_eq!(result.doc, "");
        assert!(result.app_sources.is_empty());
        assert!(result.media.is_empty());
    }

    #[test]
    fn test_empty_source_produces_nothing() {
        let result = process("", "package examples.empty", None).unwrap();
        assert_eq!(result.doc, "");
        assert!(result.app_sources.is_empty());
        assert!(result.media.is_empty());
    }

    #[test]
    fn test_full_tour_document() {
        let result = process(testing::FULL_TOUR, "package examples.shapes", None).unwrap();
        insta::assert_snapshot!(result.doc, @r###"
        # Drawing shapes

        Circles, rectangles and lines come first.

        ![](media/shapes-001.png)

        ## A circle

        ```kotlin
        extend {
            drawer.fill = ColorRGBa.PINK
            drawer.circle(drawer.bounds.center, 140.0)
        }
        ```

        ```kotlin
        val radius = 140.0
        announce(radius)
        ```
        "###);
    }

    #[test]
    fn test_full_tour_program() {
        let result = process(testing::FULL_TOUR, "package examples.shapes", None).unwrap();
        assert_eq!(result.app_sources.len(), 1);
        insta::assert_snapshot!(result.app_sources[0], @r###"
        package examples.shapes

        import org.openrndr.application
        import org.openrndr.color.ColorRGBa

        application {
            configure {
                width = 770
                height = 578
            }
            program {
                extend {
                    drawer.fill = ColorRGBa.PINK
                    drawer.circle(drawer.bounds.center, 140.0)
                }
            }
        }
        "###);
    }

    #[test]
    fn test_full_tour_media() {
        let result = process(testing::FULL_TOUR, "package examples.shapes", None).unwrap();
        assert_eq!(result.media, vec!["media/shapes-001.png".to_string()]);
    }

    #[test]
    fn test_annotation_imports_never_reach_programs() {
        let result = process(testing::FULL_TOUR, "package examples.shapes", None).unwrap();
        for program in &result.app_sources {
            assert!(!program.contains("annotations"));
            assert!(program.contains("import org.openrndr.application"));
        }
    }

    #[test]
    fn test_excluded_code_reaches_no_output() {
        let result = process(testing::FULL_TOUR, "package examples.shapes", None).unwrap();
        assert!(!result.doc.contains("internalChecks"));
        assert!(!result.doc.contains("debugOverlay"));
        assert!(!result.doc.contains(MARKER));
        for program in &result.app_sources {
            assert!(!program.contains("internalChecks"));
            assert!(!program.contains("debugOverlay"));
            assert!(!program.contains(MARKER));
        }
    }

    #[test]
    fn test_documentation_text_reaches_no_program() {
        let result = process(testing::FULL_TOUR, "package examples.shapes", None).unwrap();
        for program in &result.app_sources {
            assert!(!program.contains("## A circle"));
            assert!(!program.contains("@Text"));
            assert!(!program.contains("@Code"));
        }
    }

    #[test]
    fn test_links_only_inside_open_applications() {
        let make_link = |index: usize| format!("https://example.org/shapes{:03}.kt", index);
        let result = process(testing::FULL_TOUR, "package examples.shapes", Some(&make_link))
            .unwrap();
        // the excerpt inside the application links to it; the run block after
        // the application closes does not
        assert_eq!(
            example_links(&result),
            vec!["[Link to the full example](https://example.org/shapes001.kt)"]
        );
    }

    #[test]
    fn test_no_links_without_a_builder() {
        let result = process(testing::FULL_TOUR, "package examples.shapes", None).unwrap();
        assert!(example_links(&result).is_empty());
    }

    #[test]
    fn test_minimal_application_extraction() {
        let result = process(testing::MINIMAL, "package examples.minimal", None).unwrap();
        assert_eq!(result.doc, "");
        assert_eq!(result.app_sources.len(), 1);
        insta::assert_snapshot!(result.app_sources[0], @r###"
        package examples.minimal

        import org.openrndr.application

        application {
            program {
                draw()
            }
        }
        "###);
    }

    #[test]
    fn test_text_only_renders_prose() {
        let result = process(testing::TEXT_ONLY, "package examples.about", None).unwrap();
        assert_eq!(result.doc, "# About\n\nNothing to run here.");
        assert!(result.app_sources.is_empty());
        assert!(result.media.is_empty());
    }

    #[test]
    fn test_processing_is_deterministic() {
        let first = process(testing::FULL_TOUR, "package examples.shapes", None).unwrap();
        let second = process(testing::FULL_TOUR, "package examples.shapes", None).unwrap();
        assert_eq!(first.doc, second.doc);
        assert_eq!(first.app_sources, second.app_sources);
        assert_eq!(first.media, second.media);
    }

    #[test]
    fn test_extracted_programs_parse_cleanly() {
        for (name, source) in testing::valid_samples() {
            let result = process(source, "package examples.regen", None).unwrap();
            for program in &result.app_sources {
                if let Err(err) = parse(program) {
                    panic!("program from {} does not parse: {}\n{}", name, err, program);
                }
            }
        }
    }

    #[test]
    fn test_text_on_non_literal_is_rejected() {
        let err = process(testing::NON_LITERAL_TEXT, "package examples.bad", None).unwrap_err();
        assert!(matches!(err, ProcessError::NonLiteralExpression { .. }));
        assert!(err.to_string().contains("@Text"));
    }

    #[test]
    fn test_code_block_on_non_run_call_is_rejected() {
        let err = process(testing::BAD_CODE_BLOCK, "package examples.bad", None).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidCodeBlockTarget { .. }));
        assert!(err.to_string().contains("@Code.Block"));
    }

    #[test]
    fn test_parse_failure_carries_position() {
        let err = process("fun (\n", "package examples.bad", None).unwrap_err();
        match err {
            ProcessError::Parse(parse_error) => assert_eq!(parse_error.line, 1),
            other => panic!("expected a parse error, got {}", other),
        }
    }
}
