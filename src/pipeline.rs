//! File system pipeline around the pure processor
//!
//! The pipeline walks the configured sources directory and processes every
//! `.kt` file it finds. Each source produces a markdown document mirroring
//! the source tree layout, one program file per captured application, and
//! copies of the media the document references. A failure in one file is
//! logged and counted without stopping the run; only an unreadable sources
//! directory aborts.

use crate::config::DokweaveConfig;
use crate::dispatch::LinkBuilder;
use crate::error::PipelineError;
use crate::processor;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Characters that cannot appear in a package segment
static NON_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").unwrap());

/// Counters for one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub files_processed: usize,
    pub files_failed: usize,
    pub applications_written: usize,
    pub media_copied: usize,
}

struct FileOutcome {
    applications: usize,
    media: usize,
}

pub struct Pipeline {
    config: DokweaveConfig,
}

impl Pipeline {
    pub fn new(config: DokweaveConfig) -> Pipeline {
        Pipeline { config }
    }

    /// Process every annotated source under the configured directory
    pub fn run(&self) -> Result<Summary, PipelineError> {
        let sources = discover_sources(&self.config.pipeline.sources_dir)?;
        info!(files = sources.len(), "processing annotated sources");
        let mut summary = Summary::default();
        for path in &sources {
            match self.process_file(path) {
                Ok(outcome) => {
                    summary.files_processed += 1;
                    summary.applications_written += outcome.applications;
                    summary.media_copied += outcome.media;
                }
                Err(err) => {
                    error!("{}", err);
                    summary.files_failed += 1;
                }
            }
        }
        Ok(summary)
    }

    fn process_file(&self, path: &Path) -> Result<FileOutcome, PipelineError> {
        let paths = &self.config.pipeline;
        let source = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        let relative = path
            .strip_prefix(&paths.sources_dir)
            .map_err(|_| PipelineError::OutsideSourceTree {
                path: path.to_path_buf(),
            })?;
        let header = package_header(&paths.examples_package_root, relative);
        let stem = relative
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();

        let relative_dir = relative.parent().unwrap_or(Path::new(""));
        let link_builder: Option<Box<LinkBuilder>> =
            self.config.render.web_root_url.as_ref().map(|root| {
                // the URL mirrors the application writer's output layout
                let mut base = root.trim_end_matches('/').to_string();
                for component in relative_dir.components() {
                    base.push('/');
                    base.push_str(&component.as_os_str().to_string_lossy());
                }
                let stem = stem.clone();
                Box::new(move |index: usize| format!("{}/{}{:03}.kt", base, stem, index))
                    as Box<LinkBuilder>
            });

        let result = processor::process_with_language(
            &source,
            &header,
            link_builder.as_deref(),
            &self.config.render.language_tag,
        )
        .map_err(|e| PipelineError::Process {
            path: path.to_path_buf(),
            source: e,
        })?;

        let doc_path = paths.docs_out_dir.join(relative).with_extension("md");
        write_file(&doc_path, &result.doc)?;
        debug!(path = %doc_path.display(), "wrote document");

        let mut outcome = FileOutcome {
            applications: 0,
            media: 0,
        };
        for (i, program) in result.app_sources.iter().enumerate() {
            let app_path = paths
                .examples_out_dir
                .join(relative_dir)
                .join(format!("{}{:03}.kt", stem, i + 1));
            write_file(&app_path, program)?;
            debug!(path = %app_path.display(), "wrote application");
            outcome.applications += 1;
        }

        for media in &result.media {
            let from = paths.media_src_dir.join(media);
            let to = paths.media_out_dir.join(media);
            if !from.is_file() {
                warn!(path = %from.display(), "referenced media not found");
                continue;
            }
            if let Some(parent) = to.parent() {
                fs::create_dir_all(parent).map_err(|e| io_error(&to, e))?;
            }
            fs::copy(&from, &to).map_err(|e| io_error(&from, e))?;
            outcome.media += 1;
        }

        Ok(outcome)
    }
}

/// All `.kt` files under `dir`, recursively, in sorted order
pub fn discover_sources(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let mut found = Vec::new();
    walk(dir, &mut found)?;
    found.sort();
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), PipelineError> {
    let entries = fs::read_dir(dir).map_err(|e| io_error(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_error(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, found)?;
        } else if path.extension().map_or(false, |ext| ext == "kt") {
            found.push(path);
        }
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error(path, e))?;
    }
    fs::write(path, contents).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, source: std::io::Error) -> PipelineError {
    PipelineError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Package directive for a source at `relative` below the package root
fn package_header(package_root: &str, relative: &Path) -> String {
    let mut segments = vec![package_root.to_string()];
    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            segments.push(sanitize_segment(&component.as_os_str().to_string_lossy()));
        }
    }
    format!("package {}", segments.join("."))
}

/// Rewrite a path component into a valid package segment
fn sanitize_segment(text: &str) -> String {
    let cleaned = NON_SEGMENT.replace_all(text, "_").into_owned();
    match cleaned.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{}", cleaned),
        _ => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_segment() {
        assert_eq!(sanitize_segment("drawing"), "drawing");
        assert_eq!(sanitize_segment("05_drawing"), "_05_drawing");
        assert_eq!(sanitize_segment("draw-complex"), "draw_complex");
        assert_eq!(sanitize_segment("a.b c"), "a_b_c");
    }

    #[test]
    fn test_package_header_from_relative_path() {
        assert_eq!(
            package_header("examples", Path::new("05_drawing/C00_shapes.kt")),
            "package examples._05_drawing"
        );
        assert_eq!(
            package_header("examples", Path::new("intro.kt")),
            "package examples"
        );
        assert_eq!(
            package_header("examples", Path::new("a/b-c/file.kt")),
            "package examples.a.b_c"
        );
    }
}
