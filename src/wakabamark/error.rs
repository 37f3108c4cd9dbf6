//! Error types for the public parse entry point.
//!
//! Inside the engine, failure is an ordinary `None` handled locally by the
//! combinator that received it. Only the outermost document match surfaces
//! an error to the caller, through this type.

use std::fmt;

/// Errors reported by [`parse`](crate::wakabamark::grammar::parse).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not even one paragraph could be formed from the input.
    NoParagraph,
    /// Paragraphs matched but input remains, starting at `offset` bytes.
    ///
    /// This happens on a suffix that cannot start a paragraph, such as a
    /// dangling delimiter that never closes.
    TrailingInput { offset: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NoParagraph => write!(f, "no paragraph could be formed"),
            ParseError::TrailingInput { offset } => {
                write!(f, "unparseable input remains at byte offset {}", offset)
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        assert_eq!(
            ParseError::NoParagraph.to_string(),
            "no paragraph could be formed"
        );
        assert_eq!(
            ParseError::TrailingInput { offset: 3 }.to_string(),
            "unparseable input remains at byte offset 3"
        );
    }
}
