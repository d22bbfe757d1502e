//! Parser for sentence templates.
//!
//! The parser converts a stream of tokens into a template [`Node`].
//!
//! ```text
//! template    := alternative ('|' alternative)*
//! alternative := item*
//! item        := atom (converter | tag)*
//! atom        := WORD | RANGE | '$'NAME | '<'NAME'>' | '(' template ')' | '[' template ']'
//! converter   := '!'NAME (',' ARG)*
//! tag         := '{'NAME converter*'}'
//! ```
//!
//! A number range `a..b[,step]` becomes an alternation of its numbers
//! converted with `!int`.

use fuzzyintent_foundation::{Error, Result};

use crate::ast::Node;
use crate::converter::Converter;
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Parser for a single sentence template.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
    /// Full source line (for error messages).
    context: &'src str,
}

impl<'src> Parser<'src> {
    /// Creates a parser for a standalone template.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self::at(source, 1, 1, source)
    }

    /// Creates a parser for a template found at `line`/`column` of a file.
    ///
    /// `context` is the full source line, quoted in error messages.
    #[must_use]
    pub fn at(source: &'src str, line: u32, column: u32, context: &'src str) -> Self {
        let mut lexer = Lexer::at(source, line, column);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            context,
        }
    }

    /// Parses the whole template.
    ///
    /// # Errors
    /// Returns a syntax error if the template is malformed.
    pub fn parse(&mut self) -> Result<Node> {
        let node = self.parse_alternation()?;
        match &self.current.kind {
            TokenKind::Eof => Ok(node),
            TokenKind::Error(msg) => Err(self.error(msg)),
            kind => Err(self.error(&format!("unexpected {}", kind.name()))),
        }
    }

    /// Parses `alternative ('|' alternative)*`.
    fn parse_alternation(&mut self) -> Result<Node> {
        let start = self.current.span;
        let mut branches = vec![self.parse_sequence()?];

        while self.current.kind == TokenKind::Pipe {
            self.advance();
            branches.push(self.parse_sequence()?);
        }

        if branches.len() == 1 {
            Ok(branches.remove(0))
        } else {
            Ok(Node::Alternation(branches, start.to(self.current.span)))
        }
    }

    /// Parses items until a `|`, a closing delimiter, or the end.
    fn parse_sequence(&mut self) -> Result<Node> {
        let start = self.current.span;
        let mut items = Vec::new();

        loop {
            match &self.current.kind {
                TokenKind::Pipe | TokenKind::Eof => break,
                _ if self.current.is_close_delimiter() => break,
                _ => items.push(self.parse_item()?),
            }
        }

        match items.len() {
            0 => Ok(Node::empty(Span::point(start.start, start.line, start.column))),
            1 => Ok(items.remove(0)),
            _ => {
                let span = items[0].span().to(items[items.len() - 1].span());
                Ok(Node::Sequence(items, span))
            }
        }
    }

    /// Parses an atom followed by any number of converters and tags.
    fn parse_item(&mut self) -> Result<Node> {
        let mut node = self.parse_atom()?;

        loop {
            let span = node.span().to(self.current.span);
            match &self.current.kind {
                TokenKind::Tag { name, converters } => {
                    let (tag, converters) = (name.clone(), converters.clone());
                    self.advance();
                    node = Node::Tagged {
                        tag,
                        converters,
                        node: Box::new(node),
                        span,
                    };
                }
                TokenKind::Converter(converter) => {
                    let converter = converter.clone();
                    self.advance();
                    node = match node {
                        Node::Converted {
                            node,
                            mut converters,
                            ..
                        } => {
                            converters.push(converter);
                            Node::Converted {
                                node,
                                converters,
                                span,
                            }
                        }
                        other => Node::Converted {
                            node: Box::new(other),
                            converters: vec![converter],
                            span,
                        },
                    };
                }
                _ => return Ok(node),
            }
        }
    }

    /// Parses a single element.
    fn parse_atom(&mut self) -> Result<Node> {
        let span = self.current.span;
        match &self.current.kind {
            TokenKind::Word { text, substitution } => {
                let node = Node::Literal {
                    text: text.clone(),
                    substitution: substitution.clone(),
                    span,
                };
                self.advance();
                Ok(node)
            }
            TokenKind::SlotRef(name) => {
                let node = Node::SlotRef(name.clone(), span);
                self.advance();
                Ok(node)
            }
            TokenKind::RuleRef(name) => {
                let node = Node::RuleRef(name.clone(), span);
                self.advance();
                Ok(node)
            }
            &TokenKind::Range { start, end, step } => {
                self.advance();
                Ok(number_range(start, end, step, span))
            }
            TokenKind::LParen => self.parse_group(),
            TokenKind::LBracket => self.parse_optional(),
            TokenKind::Tag { name, .. } => {
                Err(self.error(&format!("tag {{{name}}} must follow an element")))
            }
            TokenKind::Converter(converter) => {
                Err(self.error(&format!("converter {converter} must follow an element")))
            }
            TokenKind::Error(msg) => Err(self.error(msg)),
            kind => Err(self.error(&format!("unexpected {}", kind.name()))),
        }
    }

    /// Parses `( ... )`.
    fn parse_group(&mut self) -> Result<Node> {
        let start = self.current.span;
        self.advance();
        let inner = self.parse_alternation()?;
        let end = self.expect(&TokenKind::RParen, start, "group")?;

        Ok(match inner {
            Node::Alternation(branches, _) => Node::Alternation(branches, start.to(end)),
            Node::Sequence(items, _) => Node::Sequence(items, start.to(end)),
            other => other,
        })
    }

    /// Parses `[ ... ]`.
    fn parse_optional(&mut self) -> Result<Node> {
        let start = self.current.span;
        self.advance();
        let inner = self.parse_alternation()?;
        let end = self.expect(&TokenKind::RBracket, start, "optional")?;
        Ok(Node::Optional(Box::new(inner), start.to(end)))
    }

    /// Consumes the expected closer, reporting the opener on failure.
    fn expect(&mut self, expected: &TokenKind, opener: Span, what: &str) -> Result<Span> {
        if &self.current.kind == expected {
            let span = self.current.span;
            self.advance();
            return Ok(span);
        }
        match &self.current.kind {
            TokenKind::Eof => Err(self.error_at(
                opener,
                &format!("unterminated {what}, expected {}", expected.name()),
            )),
            TokenKind::Error(msg) => Err(self.error(msg)),
            found => Err(self.error(&format!(
                "expected {} to close {what}, found {}",
                expected.name(),
                found.name()
            ))),
        }
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Creates an error at the current token.
    fn error(&self, message: &str) -> Error {
        self.error_at(self.current.span, message)
    }

    /// Creates an error at a specific span.
    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::syntax(message, span.line, span.column, self.context.to_string())
    }
}

/// Spells out an inclusive range as `(start | ... | end)!int`.
fn number_range(start: i64, end: i64, step: i64, span: Span) -> Node {
    let mut numbers = Vec::new();
    let mut n = start;
    while n <= end {
        numbers.push(Node::literal(n.to_string(), span));
        match n.checked_add(step) {
            Some(next) => n = next,
            None => break,
        }
    }
    let alternation = if numbers.len() == 1 {
        numbers.remove(0)
    } else {
        Node::Alternation(numbers, span)
    };
    Node::Converted {
        node: Box::new(alternation),
        converters: vec![Converter::new("int")],
        span,
    }
}

/// Parses a standalone template.
///
/// # Errors
/// Returns a syntax error if the template is malformed.
pub fn parse_template(source: &str) -> Result<Node> {
    Parser::new(source).parse()
}
