//! Comment line classification
//!
//! CMX comment lines start with `*`. Two forms carry structured data and are
//! kept apart from free text:
//!
//! ```text
//! * FROM CLIP NAME: interview_take3.mov
//! * SOURCE FILE: A001C003_220101_R1AB.mov
//! ```

use crate::patterns;

/// What a single comment line holds, already trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comment {
    SourceFile(String),
    SourceClip(String),
    Text(String),
}

impl Comment {
    /// Classify a comment line
    ///
    /// The `*` marker is stripped when present. Text without a marker is
    /// taken whole.
    pub fn parse(input: &str) -> Self {
        if let Some(caps) = patterns::SOURCE_FILE.captures(input) {
            return Comment::SourceFile(caps[1].trim().to_string());
        }
        if let Some(caps) = patterns::SOURCE_CLIP.captures(input) {
            return Comment::SourceClip(caps[1].trim().to_string());
        }

        let text = match patterns::COMMENT.captures(input) {
            Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
            None => input,
        };
        Comment::Text(text.trim().to_string())
    }
}
