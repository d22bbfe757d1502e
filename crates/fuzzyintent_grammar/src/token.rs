//! Token types for sentence templates.
//!
//! Tokens are the output of the lexer and input to the template parser.

use crate::converter::Converter;
use crate::span::Span;

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The type and value of this token.
    pub kind: TokenKind,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this token closes a group.
    #[must_use]
    pub const fn is_close_delimiter(&self) -> bool {
        matches!(self.kind, TokenKind::RParen | TokenKind::RBracket)
    }
}

/// Token types for sentence templates.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Delimiters
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `|`
    Pipe,

    // Elements
    /// A literal word, optionally with an output substitution (`ten:10`).
    Word {
        /// The spoken text.
        text: String,
        /// Replacement output text, if any.
        substitution: Option<String>,
    },
    /// `$name`
    SlotRef(String),
    /// `<name>` or `<Intent.name>`
    RuleRef(String),
    /// `{name}` or `{name!conv}` naming the slot covered by the preceding
    /// element
    Tag {
        /// Slot name.
        name: String,
        /// Converters applied to the slot value.
        converters: Vec<Converter>,
    },
    /// `!name` or `!name,arg` converting the preceding element
    Converter(Converter),
    /// `start..end` or `start..end,step`, an inclusive number range
    Range {
        /// First number.
        start: i64,
        /// Last number (inclusive).
        end: i64,
        /// Distance between numbers.
        step: i64,
    },

    // Meta
    /// End of input
    Eof,
    /// Lexer error
    Error(String),
}

impl TokenKind {
    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Pipe => "'|'",
            Self::Word { .. } => "word",
            Self::SlotRef(_) => "slot reference",
            Self::RuleRef(_) => "rule reference",
            Self::Tag { .. } => "tag",
            Self::Converter(_) => "converter",
            Self::Range { .. } => "number range",
            Self::Eof => "end of input",
            Self::Error(_) => "error",
        }
    }
}
