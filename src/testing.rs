//! Curated sample sources for tests
//!
//! Annotated Kotlin is easy to get subtly wrong in hand-written test strings,
//! and scattered copies drift apart when the accepted subset changes. Tests
//! should take their input from these named samples so a grammar change only
//! needs fixing in one place.

/// Exercises every label on one page: top-level prose and media, an
/// application with nested documentation and an excerpt, a run block after
/// the application closes, and an excluded region.
pub const FULL_TOUR: &str = r#"import org.openrndr.application
import org.openrndr.color.ColorRGBa
import org.openrndr.dokweave.annotations.*

@Text
"""
# Drawing shapes

Circles, rectangles and lines come first.
"""

@Media.Image
"""
media/shapes-001.png
"""

@Application
application {
    configure {
        width = 770
        height = 578
    }
    program {
        @Text
        """
        ## A circle
        """
        @Code
        extend {
            drawer.fill = ColorRGBa.PINK
            drawer.circle(drawer.bounds.center, 140.0)
        }
        @Exclude
        debugOverlay()
    }
}

@Code.Block
run {
    val radius = 140.0
    announce(radius)
}

@Exclude
run {
    internalChecks()
}
"#;

/// One application and nothing else
pub const MINIMAL: &str = r#"import org.openrndr.application

@Application
application {
    program {
        draw()
    }
}
"#;

/// Prose only, no application
pub const TEXT_ONLY: &str = r#"@Text
"""
# About

Nothing to run here.
"""
"#;

/// `@Text` on a call; processing must reject it
pub const NON_LITERAL_TEXT: &str = r#"@Text
println("not documentation")
"#;

/// `@Code.Block` on something that is not a `run { ... }` call
pub const BAD_CODE_BLOCK: &str = r#"@Code.Block
println("not a run block")
"#;

/// Samples that process without error, with their names
pub fn valid_samples() -> Vec<(&'static str, &'static str)> {
    vec![
        ("full_tour", FULL_TOUR),
        ("minimal", MINIMAL),
        ("text_only", TEXT_ONLY),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kotlin::parse;

    #[test]
    fn test_valid_samples_parse() {
        for (name, source) in valid_samples() {
            if let Err(err) = parse(source) {
                panic!("sample {} failed to parse: {}", name, err);
            }
        }
    }

    #[test]
    fn test_failing_samples_still_parse() {
        // these fail at dispatch time, not parse time
        assert!(parse(NON_LITERAL_TEXT).is_ok());
        assert!(parse(BAD_CODE_BLOCK).is_ok());
    }
}
