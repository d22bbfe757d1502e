//! Abstract syntax tree for sentence templates.

use std::fmt;

use crate::converter::Converter;
use crate::span::Span;

/// A template AST node.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// A literal word like `light`, optionally with an output substitution.
    Literal {
        /// The spoken text.
        text: String,
        /// Output text reported instead of `text` (`ten:10`).
        substitution: Option<String>,
        /// Source location.
        span: Span,
    },
    /// Elements in order, like `turn on the light`. Empty means "nothing".
    Sequence(Vec<Node>, Span),
    /// Any one of the branches, like `(on | off)`.
    Alternation(Vec<Node>, Span),
    /// Optional element, like `[the]`.
    Optional(Box<Node>, Span),
    /// Rule reference like `<level>` (qualified after resolution).
    RuleRef(String, Span),
    /// Slot reference like `$color`.
    SlotRef(String, Span),
    /// Element whose words fill the named slot, like `(red | blue){color}`.
    Tagged {
        /// The slot name.
        tag: String,
        /// Converters applied to the slot value (`{number!int}`).
        converters: Vec<Converter>,
        /// The tagged element.
        node: Box<Node>,
        /// Source location.
        span: Span,
    },
    /// Element whose outputs pass through converters, like `ten:10!int`.
    Converted {
        /// The converted element.
        node: Box<Node>,
        /// Converters, applied in order.
        converters: Vec<Converter>,
        /// Source location.
        span: Span,
    },
}

impl Node {
    /// Creates a literal without substitution.
    #[must_use]
    pub fn literal(text: impl Into<String>, span: Span) -> Self {
        Self::Literal {
            text: text.into(),
            substitution: None,
            span,
        }
    }

    /// Creates the empty expansion.
    #[must_use]
    pub const fn empty(span: Span) -> Self {
        Self::Sequence(Vec::new(), span)
    }

    /// Returns the source span of this node.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Literal { span, .. }
            | Self::Sequence(_, span)
            | Self::Alternation(_, span)
            | Self::Optional(_, span)
            | Self::RuleRef(_, span)
            | Self::SlotRef(_, span)
            | Self::Tagged { span, .. }
            | Self::Converted { span, .. } => *span,
        }
    }

    /// Returns a human-readable name for this node type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Literal { .. } => "literal",
            Self::Sequence(..) => "sequence",
            Self::Alternation(..) => "alternation",
            Self::Optional(..) => "optional",
            Self::RuleRef(..) => "rule reference",
            Self::SlotRef(..) => "slot reference",
            Self::Tagged { .. } => "tagged element",
            Self::Converted { .. } => "converted element",
        }
    }

    /// Returns true if this node is the empty sequence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Sequence(items, _) if items.is_empty())
    }

    /// Returns the literal text, or None if not a literal.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Returns the children of a sequence or alternation.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Sequence(items, _) | Self::Alternation(items, _) => items,
            Self::Optional(node, _) | Self::Tagged { node, .. } | Self::Converted { node, .. } => {
                std::slice::from_ref(node)
            }
            _ => &[],
        }
    }

    /// Visits this node and all descendants, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Visits this node and all descendants mutably, children first.
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Node)) {
        match self {
            Self::Sequence(items, _) | Self::Alternation(items, _) => {
                for item in items {
                    item.walk_mut(visit);
                }
            }
            Self::Optional(node, _) | Self::Tagged { node, .. } | Self::Converted { node, .. } => {
                node.walk_mut(visit);
            }
            _ => {}
        }
        visit(self);
    }

    /// Collects the names of all rules referenced by this node.
    #[must_use]
    pub fn rule_refs(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.walk(&mut |node| {
            if let Self::RuleRef(name, _) = node {
                names.push(name.as_str());
            }
        });
        names
    }

    /// Collects the names of all slots referenced by this node.
    #[must_use]
    pub fn slot_refs(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.walk(&mut |node| {
            if let Self::SlotRef(name, _) = node {
                names.push(name.as_str());
            }
        });
        names
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal {
                text,
                substitution: Some(sub),
                ..
            } => write!(f, "{text}:{sub}"),
            Self::Literal { text, .. } => f.write_str(text),
            Self::Sequence(items, _) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    if matches!(item, Self::Alternation(..)) || item.is_empty() {
                        write!(f, "({item})")?;
                    } else {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Self::Alternation(items, _) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Optional(node, _) => write!(f, "[{node}]"),
            Self::RuleRef(name, _) => write!(f, "<{name}>"),
            Self::SlotRef(name, _) => write!(f, "${name}"),
            Self::Tagged {
                tag,
                converters,
                node,
                ..
            } => {
                write_grouped(f, node)?;
                write!(f, "{{{tag}")?;
                for converter in converters {
                    write!(f, "{converter}")?;
                }
                f.write_str("}")
            }
            Self::Converted {
                node, converters, ..
            } => {
                write_grouped(f, node)?;
                for converter in converters {
                    write!(f, "{converter}")?;
                }
                Ok(())
            }
        }
    }
}

/// Writes a node that a suffix applies to, parenthesized when needed.
fn write_grouped(f: &mut fmt::Formatter<'_>, node: &Node) -> fmt::Result {
    match node {
        Node::Sequence(..) | Node::Alternation(..) => write!(f, "({node})"),
        _ => write!(f, "{node}"),
    }
}
