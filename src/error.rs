//! Error types for the converter

use std::fmt;

use thiserror::Error;

use crate::ast::Span;

/// Source location information for error messages
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLocation {
    pub file: Option<String>,
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Stable tag for every way a conversion can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No conversion rule for the node, or the rule is disabled by config
    UnsupportedTypeKind,
    /// Identifier without a binding, or a failed cross-file export match
    MissingReference,
    /// Object type mixing named fields with an indexer, or several indexers
    MixedShape,
    UnsupportedCallSignature,
    /// Non-object member in a top-level intersection
    UnsupportedTopLevelIntersection,
    /// `HasDefaultProp` used anywhere but directly as a field value
    IllegalEscapeHatchPlacement,
    TypeofImportUnsupported,
    QualifiedIdentifierUnsupported,
    /// A component `props` field without a type annotation
    MissingTypeAnnotation,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UnsupportedTypeKind => "UnsupportedTypeKind",
            ErrorKind::MissingReference => "MissingReference",
            ErrorKind::MixedShape => "MixedShapeError",
            ErrorKind::UnsupportedCallSignature => "UnsupportedCallSignatureError",
            ErrorKind::UnsupportedTopLevelIntersection => "UnsupportedTopLevelIntersectionError",
            ErrorKind::IllegalEscapeHatchPlacement => "IllegalEscapeHatchPlacement",
            ErrorKind::TypeofImportUnsupported => "TypeofImportUnsupported",
            ErrorKind::QualifiedIdentifierUnsupported => "QualifiedIdentifierUnsupported",
            ErrorKind::MissingTypeAnnotation => "MissingTypeAnnotation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A positioned conversion failure
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message} at {location}")]
pub struct ConvertError {
    pub kind: ErrorKind,
    pub message: String,
    pub location: SourceLocation,
}

impl ConvertError {
    /// The single constructor every failure goes through
    pub fn at(kind: ErrorKind, file: Option<&str>, span: Span, message: impl Into<String>) -> Self {
        ConvertError {
            kind,
            message: message.into(),
            location: SourceLocation {
                file: file.map(str::to_string),
                line: span.line,
                column: span.column,
            },
        }
    }

    /// Babel-style code frame around the error position.
    ///
    /// `source` must be the text of the file the location points into.
    pub fn code_frame(&self, source: &str) -> String {
        let line = self.location.line as usize;
        let total = source.lines().count();
        if line == 0 || line > total {
            return self.to_string();
        }

        let first = line.saturating_sub(2).max(1);
        let last = (line + 2).min(total);
        let width = last.to_string().len();
        let column = (self.location.column as usize).max(1);

        let mut frame = format!("{}\n", self);
        for (number, text) in source.lines().enumerate().map(|(i, t)| (i + 1, t)) {
            if number < first {
                continue;
            }
            if number > last {
                break;
            }
            let marker = if number == line { '>' } else { ' ' };
            let row = format!("{} {:>width$} | {}", marker, number, text, width = width);
            frame.push_str(row.trim_end());
            frame.push('\n');
            if number == line {
                let caret = format!(
                    "  {:>width$} | {}^",
                    "",
                    " ".repeat(column - 1),
                    width = width
                );
                frame.push_str(&caret);
                frame.push('\n');
            }
        }
        frame.trim_end().to_string()
    }
}

/// Failure reported by a [`crate::module::ModuleLoader`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("Cannot find module '{specifier}' from '{importer}'")]
    NotFound { specifier: String, importer: String },

    #[error("Invalid module resolution options: {0}")]
    InvalidOptions(String),

    /// Any other host failure, such as a file that does not parse
    #[error("{0}")]
    Other(String),
}
