//! Configuration loading for the dokweave pipeline
//!
//! `defaults/dokweave.default.toml` is embedded into the binary so the
//! documented defaults and the runtime behavior stay in sync. Callers layer
//! a project file and command-line overrides on top via [`Loader`] before
//! deserializing into [`DokweaveConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/dokweave.default.toml");

/// Top-level configuration consumed by the pipeline
#[derive(Debug, Clone, Deserialize)]
pub struct DokweaveConfig {
    pub pipeline: PipelineConfig,
    pub render: RenderConfig,
}

/// Where sources are found and outputs are written
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Directory scanned recursively for annotated sources
    pub sources_dir: PathBuf,
    /// Rendered markdown documents, mirroring the source tree
    pub docs_out_dir: PathBuf,
    /// Extracted standalone example programs
    pub examples_out_dir: PathBuf,
    /// Package prefix for extracted programs
    pub examples_package_root: String,
    /// Media referenced by documents is read from here
    pub media_src_dir: PathBuf,
    /// Referenced media is copied here
    pub media_out_dir: PathBuf,
}

/// Document rendering knobs
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Language tag applied to fenced code blocks
    pub language_tag: String,
    /// Base URL for example links; no links are emitted when unset
    pub web_root_url: Option<String>,
}

/// Helper for layering overrides over the built-in defaults
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file; a missing file is an error
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file, ignored when absent
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, as set by command-line flags
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration
    pub fn build(self) -> Result<DokweaveConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults
pub fn load_defaults() -> Result<DokweaveConfig, ConfigError> {
    Loader::new().build()
}
