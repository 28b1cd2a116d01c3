use std::fmt;

/// Errors that can occur while parsing or rendering a template
#[derive(Debug, thiserror::Error)]
pub enum HamlError {
    #[error("line {line}: could not parse indentation")]
    IndentError { line: usize },

    #[error("line {line}: indentation deepened by more than one level")]
    SkippedIndentLevel { line: usize },

    #[error("line {line}: only one declaration is allowed per template")]
    DuplicateDeclaration { line: usize },

    #[error("line {line}: declarations must not be nested inside a block")]
    NestedDeclaration { line: usize },

    #[error("line {line}: malformed tag name: {message}")]
    MalformedTagName { line: usize, message: String },

    #[error("line {line}: malformed attribute list: {message}")]
    MalformedAttributeList { line: usize, message: String },

    #[error("line {line}: unmatched closing bracket")]
    UnmatchedBracket { line: usize },

    #[error("line {line}: value runs past the end of the line")]
    UnterminatedValue { line: usize },

    #[error("line {line}: evaluation `#{{` is never closed")]
    UnclosedEvaluation { line: usize },

    #[error("line {line}: no expression given after `=`")]
    EmptyEvaluation { line: usize },

    #[error("line {line}: this element can't contain nested lines")]
    IllegalChildren { line: usize },

    #[error("line {line}: doctype can't be inside a block")]
    DoctypeNotTopLevel { line: usize },

    #[error("line {line}: unknown doctype `{token}`")]
    UnknownDoctypeToken { line: usize, token: String },

    #[error("failed to write generated source: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HamlError>;

impl HamlError {
    /// The 1-based source line the error originates from, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            HamlError::IndentError { line }
            | HamlError::SkippedIndentLevel { line }
            | HamlError::DuplicateDeclaration { line }
            | HamlError::NestedDeclaration { line }
            | HamlError::MalformedTagName { line, .. }
            | HamlError::MalformedAttributeList { line, .. }
            | HamlError::UnmatchedBracket { line }
            | HamlError::UnterminatedValue { line }
            | HamlError::UnclosedEvaluation { line }
            | HamlError::EmptyEvaluation { line }
            | HamlError::IllegalChildren { line }
            | HamlError::DoctypeNotTopLevel { line }
            | HamlError::UnknownDoctypeToken { line, .. } => Some(*line),
            HamlError::Io(_) => None,
        }
    }
}

/// Display context for better error messages
pub struct ErrorContext<'a> {
    pub source: &'a str,
    pub error: &'a HamlError,
}

impl<'a> ErrorContext<'a> {
    pub fn new(source: &'a str, error: &'a HamlError) -> Self {
        Self { source, error }
    }

    /// Get the source line containing the error
    pub fn source_line(&self) -> Option<&'a str> {
        let line = self.error.line()?;
        self.source
            .lines()
            .nth(line.checked_sub(1)?)
            .map(|l| l.trim_end_matches('\r'))
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.error)?;

        if let (Some(line), Some(source_line)) = (self.error.line(), self.source_line()) {
            let gutter = line.to_string();
            writeln!(f, "{} |", " ".repeat(gutter.len()))?;
            writeln!(f, "{} | {}", gutter, source_line)?;
        }

        Ok(())
    }
}
