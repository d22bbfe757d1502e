//! Sentence file reader.
//!
//! Sentence files are ini-style: a `[Intent]` header opens a section, lines of
//! the form `name = template` define local rules, and every other non-blank
//! line is a sentence template for the current intent. Lines starting with `#`
//! are comments.

use fuzzyintent_foundation::{Error, Result};

use crate::ast::Node;
use crate::lexer::is_name_char;
use crate::parser::Parser;

/// A parsed `[Intent]` section.
#[derive(Clone, Debug)]
pub struct Section {
    /// Intent name from the header.
    pub name: String,
    /// Line of the header (1-based).
    pub line: u32,
    /// Local rule definitions, in order.
    pub rules: Vec<RuleDef>,
    /// Sentence templates, in order.
    pub sentences: Vec<Node>,
}

/// A `name = template` line.
#[derive(Clone, Debug)]
pub struct RuleDef {
    /// Unqualified rule name.
    pub name: String,
    /// Parsed rule body.
    pub body: Node,
    /// Line of the definition (1-based).
    pub line: u32,
}

/// Parses a sentence file into its sections.
///
/// # Errors
/// Returns a syntax error (with the source name and position attached) if a
/// template is malformed or a sentence appears before any section header.
pub fn parse_sections(source_name: &str, text: &str) -> Result<Vec<Section>> {
    let mut sections: Vec<Section> = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = u32::try_from(index + 1).unwrap_or(u32::MAX);
        let trimmed = raw_line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(name) = section_header(trimmed) {
            if name.contains('.') {
                return Err(Error::syntax(
                    format!("intent name '{name}' cannot contain '.'"),
                    line,
                    column_of(raw_line, name),
                    raw_line.to_string(),
                )
                .in_source(source_name));
            }
            sections.push(Section {
                name: name.to_string(),
                line,
                rules: Vec::new(),
                sentences: Vec::new(),
            });
            continue;
        }

        let Some(section) = sections.last_mut() else {
            return Err(Error::syntax(
                "sentence outside of an intent section",
                line,
                column_of(raw_line, trimmed),
                raw_line.to_string(),
            )
            .in_source(source_name));
        };

        if let Some((name, body)) = rule_definition(trimmed) {
            let column = column_of(raw_line, body);
            let body = Parser::at(body, line, column, raw_line)
                .parse()
                .map_err(|e| e.in_source(source_name))?;
            section.rules.push(RuleDef {
                name: name.to_string(),
                body,
                line,
            });
        } else {
            let column = column_of(raw_line, trimmed);
            let sentence = Parser::at(trimmed, line, column, raw_line)
                .parse()
                .map_err(|e| e.in_source(source_name))?;
            section.sentences.push(sentence);
        }
    }

    Ok(sections)
}

/// Returns the bracketed name if the line is exactly `[Name]`.
///
/// Names containing `.` are returned too so the caller can reject them.
fn section_header(line: &str) -> Option<&str> {
    let name = line.strip_prefix('[')?.strip_suffix(']')?.trim();
    if !name.is_empty() && name.chars().all(|c| c == '.' || is_section_char(c)) {
        Some(name)
    } else {
        None
    }
}

/// Splits `name = body`, returning None for ordinary sentences.
fn rule_definition(line: &str) -> Option<(&str, &str)> {
    let (name, body) = line.split_once('=')?;
    let name = name.trim();
    if !name.is_empty() && name.chars().all(is_section_char) {
        Some((name, body.trim()))
    } else {
        None
    }
}

/// Intent and rule names cannot contain `.`, which separates qualified names.
fn is_section_char(c: char) -> bool {
    is_name_char(c) && c != '.' && c != '/'
}

/// Returns the 1-based column at which `part` starts inside `line`.
fn column_of(line: &str, part: &str) -> u32 {
    let offset = part.as_ptr() as usize - line.as_ptr() as usize;
    u32::try_from(line[..offset].chars().count() + 1).unwrap_or(u32::MAX)
}
