//! # dokweave
//!
//! Extracts literate documentation and runnable examples from annotated
//! Kotlin sources.
//!
//! A source file under the docs tree mixes real program code with
//! documentation annotations (`@Text`, `@Code`, `@Media.Image`, ...). One
//! pass over the parsed tree produces a markdown document and, for every
//! `@Application`, a standalone runnable program assembled from the package
//! header, the file's imports and the captured body.
//!
//! ## Testing
//!
//! Test input should come from the curated samples in [`testing`], not from
//! ad-hoc annotated strings scattered across test files.

pub mod config;
pub mod dispatch;
pub mod doc;
pub mod error;
pub mod fold;
pub mod kotlin;
pub mod labels;
pub mod pipeline;
pub mod processor;
pub mod sentinel;
pub mod template;
pub mod testing;

pub use processor::{process, process_with_language, ProcessResult};
