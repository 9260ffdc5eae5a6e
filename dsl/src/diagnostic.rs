//! Provides definition for diagnostics, which are the errors that stop a
//! compilation.
//!
//! A diagnostic has a stable problem code, a primary label that points into
//! the source text and optional secondary labels. The command line renders
//! diagnostics either as a single `[Error]` line or as an annotated source
//! snippet.

use std::fmt;
use std::ops::Range;

use nocap_problems::Problem;

use crate::core::{FileId, SourceSpan};

/// A position marker that has both line and offset information.
#[derive(Clone, Debug, PartialEq)]
pub struct QualifiedPosition {
    /// Line (1-indexed)
    pub line: usize,

    /// Column (1-indexed)
    pub column: usize,

    /// Byte offset from start of string (0-indexed)
    pub offset: usize,
}

/// A position marker that only has an offset in a file.
#[derive(Clone, Debug, PartialEq)]
pub struct OffsetRange {
    /// Byte offset from start of string (0-indexed)
    pub start: usize,
    /// Byte offset from end of string (0-indexed)
    pub end: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Location {
    QualifiedPosition(QualifiedPosition),
    OffsetRange(OffsetRange),
}

impl Location {
    /// Returns the byte range of the location.
    pub fn range(&self) -> Range<usize> {
        match self {
            Location::QualifiedPosition(pos) => pos.offset..pos.offset,
            Location::OffsetRange(offset) => offset.start..offset.end,
        }
    }
}

/// A label that refers to some range in a file along with a message
/// related to that range.
#[derive(Clone, Debug)]
pub struct Label {
    /// The position of label.
    pub location: Location,

    /// Identifier for the file.
    pub file_id: FileId,

    /// A message describing this label.
    pub message: String,
}

impl Label {
    pub fn offset(
        file_id: impl Into<FileId>,
        offset: impl Into<Range<usize>>,
        message: impl Into<String>,
    ) -> Self {
        let range = offset.into();
        Self {
            location: Location::OffsetRange(OffsetRange {
                start: range.start,
                end: range.end,
            }),
            file_id: file_id.into(),
            message: message.into(),
        }
    }

    pub fn span(span: &SourceSpan, message: impl Into<String>) -> Self {
        Self::offset(span.file_id.clone(), span.start..span.end, message)
    }

    /// A "position" that is a file in it's entirety rather that a particular
    /// line number.
    pub fn file(file_id: impl Into<FileId>, message: impl Into<String>) -> Self {
        Self {
            location: Location::QualifiedPosition(QualifiedPosition {
                column: 0,
                line: 0,
                offset: 0,
            }),
            file_id: file_id.into(),
            message: message.into(),
        }
    }
}

/// A diagnostic. Diagnostic have a code that is indicative of the category,
/// a primary location and possibly non-zero set of secondary location.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// A normally unique value describing the type of diagnostic.
    pub code: String,

    description: String,

    /// The primary or first diagnostic.
    pub primary: Label,

    /// Additional information about the diagnostic.
    pub secondary: Vec<Label>,
}

impl Diagnostic {
    /// Creates a diagnostic from the problem code and with the specified label.
    pub fn problem(problem: Problem, primary: Label) -> Self {
        Self {
            code: problem.code().to_string(),
            description: problem.message().to_string(),
            primary,
            secondary: vec![],
        }
    }

    pub fn with_secondary(mut self, label: Label) -> Self {
        self.secondary.push(label);
        self
    }

    /// Returns the constant description of the problem.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Error] {}", self.primary.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_when_problem_then_error_prefix_and_message() {
        let diagnostic = Diagnostic::problem(
            Problem::LabelAlreadyExists,
            Label::offset(FileId::default(), 3..8, "Label already exists: loop"),
        );

        assert_eq!("[Error] Label already exists: loop", diagnostic.to_string());
        assert_eq!("P0006", diagnostic.code);
        assert_eq!("Label already exists", diagnostic.description());
    }

    #[test]
    fn with_secondary_when_span_labels_then_keeps_order() {
        let file_id = FileId::from_string("main.nc");
        let first = SourceSpan::range(1, 2).with_file_id(&file_id);
        let second = SourceSpan::range(5, 9).with_file_id(&file_id);
        let diagnostic =
            Diagnostic::problem(Problem::LabelAlreadyExists, Label::span(&second, "a"))
                .with_secondary(Label::span(&first, "b"));

        assert_eq!(5..9, diagnostic.primary.location.range());
        assert_eq!(1, diagnostic.secondary.len());
        assert_eq!(1..2, diagnostic.secondary[0].location.range());
        assert_eq!(file_id, diagnostic.secondary[0].file_id);
    }

    #[test]
    fn range_when_file_label_then_empty_range_at_start() {
        let label = Label::file(FileId::default(), "missing");
        assert_eq!(0..0, label.location.range());
    }
}
