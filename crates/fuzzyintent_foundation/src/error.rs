//! Error types for the fuzzyintent system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// The main error type for fuzzyintent operations.
#[derive(Debug, Error)]
#[error("{kind}{}", .context.as_ref().map(|c| format!(" {c}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Sets the source name on this error, keeping any existing context.
    #[must_use]
    pub fn in_source(mut self, source: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_source(source));
        self
    }

    /// Records that the error surfaced while expanding `frame`.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(frame));
        self
    }

    /// Creates a grammar syntax error.
    #[must_use]
    pub fn syntax(message: impl Into<String>, line: u32, column: u32, context: String) -> Self {
        Self::new(ErrorKind::GrammarSyntax {
            message: message.into(),
            line,
            column,
            context,
        })
    }

    /// Creates an unresolved reference error.
    #[must_use]
    pub fn unresolved(name: impl Into<String>, referenced_from: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvedReference {
            name: name.into(),
            referenced_from: referenced_from.into(),
        })
    }

    /// Creates a cyclic reference error from the reference chain.
    #[must_use]
    pub fn cyclic(chain: Vec<String>) -> Self {
        Self::new(ErrorKind::CyclicReference { chain })
    }

    /// Creates an empty intent error.
    #[must_use]
    pub fn empty_intent(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptyIntent(name.into()))
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization(message.into()))
    }

    /// Creates an invalid artifact error.
    #[must_use]
    pub fn invalid_artifact(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArtifact(message.into()))
    }

    /// Creates a limit exceeded error.
    #[must_use]
    pub fn limit_exceeded(limit: Limit) -> Self {
        Self::new(ErrorKind::LimitExceeded(limit))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Malformed template text.
    #[error("syntax error at {line}:{column}: {message}")]
    GrammarSyntax {
        /// Description of the syntax error.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// A rule or slot was referenced but never defined.
    #[error("unresolved reference {name} in {referenced_from}")]
    UnresolvedReference {
        /// The dangling name (`$slot` or `<rule>`).
        name: String,
        /// The rule containing the reference.
        referenced_from: String,
    },

    /// A rule references itself, directly or transitively.
    #[error("cyclic reference: {}", .chain.join(" -> "))]
    CyclicReference {
        /// The reference chain, ending with the repeated name.
        chain: Vec<String>,
    },

    /// An intent expands to zero examples.
    #[error("intent {0} has no examples")]
    EmptyIntent(String),

    /// A configured size limit was exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(Limit),

    /// A slot source failed to produce values.
    #[error("slot source {slot} failed: {message}")]
    SlotSource {
        /// The slot being loaded.
        slot: String,
        /// What went wrong.
        message: String,
    },

    /// File or process I/O failure.
    #[error("I/O error: {0}")]
    Io(String),

    /// Encoding or decoding an artifact failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A decoded artifact is structurally invalid.
    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Size limits that can be exceeded during training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Limit {
    /// Too many examples would be materialized.
    MaxExamples {
        /// The configured limit.
        limit: usize,
        /// The intent being expanded when the limit was hit.
        intent: String,
    },
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxExamples { limit, intent } => {
                write!(f, "max examples ({limit}) exceeded while expanding {intent}")
            }
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file or rule name.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// Column number in source.
    pub column: Option<usize>,
    /// Chain of rules being expanded when the error occurred.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in {source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        for frame in &self.stack {
            write!(f, "\n  while expanding {frame}")?;
        }
        Ok(())
    }
}

/// Convenience alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
