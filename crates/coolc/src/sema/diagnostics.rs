//! Diagnostic accumulation and rendering
//!
//! Errors are counted and written as plain text the moment they are found,
//! one line each: `<filename>:<line>: <message>` when anchored to a class,
//! or the bare message otherwise. The counter is the only thing the driver
//! consults to decide whether compilation halts.

use std::io::{self, Write};

use thiserror::Error;

/// The structural defects this pass can report, with their rendered texts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemantError {
    #[error("Main class is not defined.")]
    MissingMainClass,

    #[error("Class {class} inherits from an undefined class {parent}")]
    UndefinedParent { class: String, parent: String },

    #[error("Class {class} cannot inherit from itself.")]
    SelfInheritance { class: String },

    #[error("Inheritance cycle detected involving class {class}")]
    InheritanceCycle { class: String },
}

/// Error counter plus output sink.
pub struct Diagnostics {
    count: usize,
    writer: Box<dyn Write>,
}

impl Diagnostics {
    /// Sink writing to standard error.
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stderr()))
    }

    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self { count: 0, writer }
    }

    /// Report an error with no source anchor.
    pub fn error(&mut self, error: &SemantError) {
        self.count += 1;
        let _ = writeln!(self.writer, "{error}");
    }

    /// Report an error anchored to a class's file and declaration line.
    pub fn error_at(&mut self, file: &str, line: u32, error: &SemantError) {
        self.count += 1;
        let _ = writeln!(self.writer, "{file}:{line}: {error}");
    }

    /// Number of errors reported so far. Monotonically non-decreasing.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn has_errors(&self) -> bool {
        self.count > 0
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sema::testing::SharedBuf;

    #[test]
    fn test_bare_message_format() {
        let buf = SharedBuf::new();
        let mut diagnostics = Diagnostics::with_writer(Box::new(buf.clone()));

        diagnostics.error(&SemantError::MissingMainClass);

        assert_eq!(buf.contents(), "Main class is not defined.\n");
        assert_eq!(diagnostics.count(), 1);
    }

    #[test]
    fn test_located_message_format() {
        let buf = SharedBuf::new();
        let mut diagnostics = Diagnostics::with_writer(Box::new(buf.clone()));

        diagnostics.error_at(
            "shapes.cl",
            7,
            &SemantError::UndefinedParent {
                class: "Circle".to_string(),
                parent: "Shape".to_string(),
            },
        );

        assert_eq!(
            buf.contents(),
            "shapes.cl:7: Class Circle inherits from an undefined class Shape\n"
        );
    }

    #[test]
    fn test_count_is_monotonic() {
        let mut diagnostics = Diagnostics::with_writer(Box::new(io::sink()));
        assert_eq!(diagnostics.count(), 0);
        assert!(!diagnostics.has_errors());

        diagnostics.error(&SemantError::MissingMainClass);
        diagnostics.error_at(
            "a.cl",
            1,
            &SemantError::SelfInheritance {
                class: "A".to_string(),
            },
        );

        assert_eq!(diagnostics.count(), 2);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn test_error_texts() {
        let cycle = SemantError::InheritanceCycle {
            class: "A".to_string(),
        };
        assert_eq!(
            cycle.to_string(),
            "Inheritance cycle detected involving class A"
        );

        let own_parent = SemantError::SelfInheritance {
            class: "B".to_string(),
        };
        assert_eq!(
            own_parent.to_string(),
            "Class B cannot inherit from itself."
        );
    }
}
