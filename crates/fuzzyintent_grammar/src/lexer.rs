//! Lexer for sentence templates.
//!
//! The lexer converts one template (a sentence line, a rule body, or a slot
//! value) into a stream of tokens.

use fuzzyintent_foundation::numbers::parse_number;

use crate::converter::Converter;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Largest number range a template may spell out.
pub const MAX_RANGE_LEN: u64 = 100_000;

/// Lexer for a single sentence template.
pub struct Lexer<'src> {
    /// Remaining template text.
    rest: &'src str,
    /// Current byte offset in the template.
    position: usize,
    /// Line of the template in its sentence file (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for a template starting at line 1, column 1.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self::at(source, 1, 1)
    }

    /// Creates a lexer for a template found at `line`/`column` of a file.
    #[must_use]
    pub fn at(source: &'src str, line: u32, column: u32) -> Self {
        Self {
            rest: source,
            position: 0,
            line,
            column,
        }
    }

    /// Returns the next token from the template.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;
        let start_column = self.column;

        let Some(c) = self.peek_char() else {
            return Token::new(
                TokenKind::Eof,
                Span::point(start, self.line, start_column),
            );
        };

        let kind = match c {
            '(' => {
                self.advance();
                TokenKind::LParen
            }
            ')' => {
                self.advance();
                TokenKind::RParen
            }
            '[' => {
                self.advance();
                TokenKind::LBracket
            }
            ']' => {
                self.advance();
                TokenKind::RBracket
            }
            '|' => {
                self.advance();
                TokenKind::Pipe
            }
            '$' => self.scan_slot_ref(),
            '<' => self.scan_delimited('>', "rule reference", TokenKind::RuleRef),
            '{' => self.scan_tag(),
            '!' => self.scan_converter(),
            '>' | '}' => {
                self.advance();
                TokenKind::Error(format!("unexpected '{c}'"))
            }
            _ => self.scan_word(),
        };

        Token::new(
            kind,
            Span::new(start, self.position, self.line, start_column),
        )
    }

    /// Tokenizes a whole template, including the trailing `Eof`.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            self.column += 1;
        }
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Consumes characters while `pred` holds and returns them.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            if !pred(c) {
                break;
            }
            text.push(c);
            self.advance();
        }
        text
    }

    /// Scans `$name`.
    fn scan_slot_ref(&mut self) -> TokenKind {
        self.advance(); // consume '$'
        let name = self.take_while(is_name_char);
        if name.is_empty() {
            TokenKind::Error("expected slot name after '$'".into())
        } else {
            TokenKind::SlotRef(name)
        }
    }

    /// Scans `<name>`.
    fn scan_delimited(
        &mut self,
        close: char,
        what: &str,
        make: fn(String) -> TokenKind,
    ) -> TokenKind {
        self.advance(); // consume opener
        let name = self.take_while(|c| c != close && !c.is_whitespace() && !is_special(c));
        if self.peek_char() != Some(close) {
            return TokenKind::Error(format!("unterminated {what}, expected '{close}'"));
        }
        self.advance();
        if name.is_empty() || !name.chars().all(is_name_char) {
            return TokenKind::Error(format!("invalid {what} name '{name}'"));
        }
        make(name)
    }

    /// Scans `{name}` with optional `!converter`s before the `}`.
    fn scan_tag(&mut self) -> TokenKind {
        self.advance(); // consume '{'
        let body = self.take_while(|c| c != '}' && !c.is_whitespace() && (c == '!' || !is_special(c)));
        if self.peek_char() != Some('}') {
            return TokenKind::Error("unterminated tag, expected '}'".into());
        }
        self.advance();

        let mut parts = body.split('!');
        let name = parts.next().unwrap_or_default();
        if name.is_empty() || !name.chars().all(is_name_char) {
            return TokenKind::Error(format!("invalid tag name '{name}'"));
        }
        let mut converters = Vec::new();
        for part in parts {
            match Converter::parse(part) {
                Some(converter) => converters.push(converter),
                None => return TokenKind::Error(format!("expected converter name after '!' in tag '{body}'")),
            }
        }
        TokenKind::Tag {
            name: name.to_string(),
            converters,
        }
    }

    /// Scans `!name` or `!name,arg,...`.
    fn scan_converter(&mut self) -> TokenKind {
        self.advance(); // consume '!'
        let text = self.take_while(|c| !c.is_whitespace() && !is_special(c));
        match Converter::parse(&text) {
            Some(converter) => TokenKind::Converter(converter),
            None => TokenKind::Error("expected converter name after '!'".into()),
        }
    }

    /// Scans a literal word with an optional `:substitution`, or a number
    /// range.
    fn scan_word(&mut self) -> TokenKind {
        let raw = self.take_while(|c| !c.is_whitespace() && !is_special(c));
        if let Some(range) = number_range(&raw) {
            return range;
        }
        match raw.split_once(':') {
            None => TokenKind::Word {
                text: raw,
                substitution: None,
            },
            Some(("", _)) => TokenKind::Error(format!("missing word before ':' in '{raw}'")),
            Some((text, substitution)) => TokenKind::Word {
                text: text.to_string(),
                substitution: Some(substitution.to_string()),
            },
        }
    }
}

/// Returns true for characters that delimit template elements.
fn is_special(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | '|' | '<' | '>' | '{' | '}' | '$' | '!')
}

/// Reads `start..end[,step]`. Returns None if `raw` is not a range.
fn number_range(raw: &str) -> Option<TokenKind> {
    let (start, rest) = raw.split_once("..")?;
    let (end, step) = match rest.split_once(',') {
        Some((end, step)) => (end, Some(step)),
        None => (rest, None),
    };
    let start = parse_number(start)?;
    let end = parse_number(end)?;
    let step = match step {
        None => 1,
        Some(step) => match parse_number(step) {
            Some(step) if step > 0 => step,
            _ => return Some(TokenKind::Error(format!("invalid step in number range '{raw}'"))),
        },
    };
    if start > end {
        return Some(TokenKind::Error(format!("empty number range '{raw}'")));
    }
    if end.abs_diff(start) / step.unsigned_abs() >= MAX_RANGE_LEN {
        return Some(TokenKind::Error(format!(
            "number range '{raw}' has more than {MAX_RANGE_LEN} values"
        )));
    }
    Some(TokenKind::Range { start, end, step })
}

/// Returns true for characters allowed in rule, slot, and tag names.
#[must_use]
pub fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '/')
}
