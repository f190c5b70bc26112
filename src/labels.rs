//! The recognized annotation label vocabulary
//!
//! Annotations drive every processing decision, and only the labels defined
//! here have an effect. Anything else written as an annotation passes through
//! untouched.
//!
//! Sources may spell a label bare (`@Text`), partially qualified
//! (`@Media.Image`) or fully qualified through its defining package
//! (`@org.openrndr.dokweave.annotations.Text`). Recognition first normalizes
//! the dotted name by dropping everything up to and including an
//! `annotations` path segment, then looks the remainder up in the fixed
//! label table.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::fmt;

/// Path segment that marks the annotation-definition namespace
pub const ANNOTATIONS_SEGMENT: &str = "annotations";

/// The labels the processor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Application,
    Text,
    Code,
    CodeBlock,
    MediaImage,
    MediaVideo,
    Exclude,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Label::Application => "Application",
            Label::Text => "Text",
            Label::Code => "Code",
            Label::CodeBlock => "Code.Block",
            Label::MediaImage => "Media.Image",
            Label::MediaVideo => "Media.Video",
            Label::Exclude => "Exclude",
        })
    }
}

static LABEL_TABLE: Lazy<BTreeMap<&'static str, Label>> = Lazy::new(|| {
    let mut table = BTreeMap::new();
    table.insert("Application", Label::Application);
    table.insert("Text", Label::Text);
    table.insert("Code", Label::Code);
    table.insert("Code.Block", Label::CodeBlock);
    table.insert("Media.Image", Label::MediaImage);
    table.insert("Media.Video", Label::MediaVideo);
    table.insert("Exclude", Label::Exclude);
    table
});

/// Drop a leading package path up to and including the `annotations` segment
pub fn normalize(dotted: &str) -> String {
    let segments: Vec<&str> = dotted.split('.').collect();
    match segments.iter().position(|s| *s == ANNOTATIONS_SEGMENT) {
        Some(i) if i + 1 < segments.len() => segments[i + 1..].join("."),
        _ => dotted.to_string(),
    }
}

/// Look up a dotted annotation name, qualified or not
pub fn recognize(dotted: &str) -> Option<Label> {
    LABEL_TABLE.get(normalize(dotted).as_str()).copied()
}

/// All recognized label names, in stable sorted order
pub fn recognized_names() -> Vec<&'static str> {
    LABEL_TABLE.keys().copied().collect()
}
