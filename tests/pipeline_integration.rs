//! Pipeline tests over real directory trees

use dokweave::config::{DokweaveConfig, PipelineConfig, RenderConfig};
use dokweave::error::PipelineError;
use dokweave::pipeline::{discover_sources, Pipeline};
use dokweave::testing;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn project_config(root: &Path) -> DokweaveConfig {
        DokweaveConfig {
            pipeline: PipelineConfig {
                sources_dir: root.join("docs"),
                docs_out_dir: root.join("out/md"),
                examples_out_dir: root.join("out/examples"),
                examples_package_root: "examples".to_string(),
                media_src_dir: root.to_path_buf(),
                media_out_dir: root.join("out/md"),
            },
            render: RenderConfig {
                language_tag: "kotlin".to_string(),
                web_root_url: None,
            },
        }
    }

    #[test]
    fn test_outputs_mirror_the_source_tree() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(&root.join("docs/05_drawing/shapes.kt"), testing::FULL_TOUR);
        write(&root.join("docs/intro.kt"), testing::TEXT_ONLY);
        write(&root.join("media/shapes-001.png"), "png bytes");

        let summary = Pipeline::new(project_config(root)).run().unwrap();
        assert_eq!(summary.files_processed, 2);
        assert_eq!(summary.files_failed, 0);
        assert_eq!(summary.applications_written, 1);
        assert_eq!(summary.media_copied, 1);

        assert!(root.join("out/md/05_drawing/shapes.md").is_file());
        assert!(root.join("out/md/intro.md").is_file());
        assert!(root.join("out/md/media/shapes-001.png").is_file());

        let program = fs::read_to_string(root.join("out/examples/05_drawing/shapes001.kt")).unwrap();
        assert!(program.starts_with("package examples._05_drawing\n"));
        assert!(program.contains("application {"));
    }

    #[test]
    fn test_failures_are_counted_without_stopping_the_run() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(&root.join("docs/a_broken.kt"), "fun (\n");
        write(&root.join("docs/b_rejected.kt"), testing::NON_LITERAL_TEXT);
        write(&root.join("docs/c_good.kt"), testing::MINIMAL);

        let summary = Pipeline::new(project_config(root)).run().unwrap();
        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.files_failed, 2);
        assert!(root.join("out/examples/c_good001.kt").is_file());
        assert!(!root.join("out/md/a_broken.md").exists());
    }

    #[test]
    fn test_missing_media_is_tolerated() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        // FULL_TOUR references media/shapes-001.png but nothing provides it
        write(&root.join("docs/shapes.kt"), testing::FULL_TOUR);

        let summary = Pipeline::new(project_config(root)).run().unwrap();
        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.files_failed, 0);
        assert_eq!(summary.media_copied, 0);
        assert!(root.join("out/md/shapes.md").is_file());
    }

    #[test]
    fn test_links_mirror_the_examples_layout() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(&root.join("docs/shapes.kt"), testing::FULL_TOUR);
        write(&root.join("docs/05_drawing/lines.kt"), testing::FULL_TOUR);

        let mut config = project_config(root);
        config.render.web_root_url = Some("https://example.org/code/".to_string());
        Pipeline::new(config).run().unwrap();

        let top = fs::read_to_string(root.join("out/md/shapes.md")).unwrap();
        assert!(top.contains("[Link to the full example](https://example.org/code/shapes001.kt)"));
        let nested = fs::read_to_string(root.join("out/md/05_drawing/lines.md")).unwrap();
        assert!(nested.contains(
            "[Link to the full example](https://example.org/code/05_drawing/lines001.kt)"
        ));
    }

    #[test]
    fn test_language_tag_reaches_the_documents() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(&root.join("docs/shapes.kt"), testing::FULL_TOUR);

        let mut config = project_config(root);
        config.render.language_tag = "kts".to_string();
        Pipeline::new(config).run().unwrap();

        let doc = fs::read_to_string(root.join("out/md/shapes.md")).unwrap();
        assert!(doc.contains("```kts\n"));
        assert!(!doc.contains("```kotlin\n"));
    }

    #[test]
    fn test_discovery_is_recursive_and_sorted() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(&root.join("docs/b/y.kt"), "");
        write(&root.join("docs/a/x.kt"), "");
        write(&root.join("docs/top.kt"), "");
        write(&root.join("docs/readme.md"), "not a source");

        let found = discover_sources(&root.join("docs")).unwrap();
        assert_eq!(
            found,
            vec![
                root.join("docs/a/x.kt"),
                root.join("docs/b/y.kt"),
                root.join("docs/top.kt"),
            ]
        );
    }

    #[test]
    fn test_empty_sources_dir_yields_an_empty_summary() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("docs")).unwrap();

        let summary = Pipeline::new(project_config(root)).run().unwrap();
        assert_eq!(summary.files_processed, 0);
        assert_eq!(summary.files_failed, 0);
    }

    #[test]
    fn test_unreadable_sources_dir_aborts() {
        let tmp = TempDir::new().unwrap();
        let err = Pipeline::new(project_config(tmp.path())).run().unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
        assert!(err.to_string().contains("docs"));
    }
}
