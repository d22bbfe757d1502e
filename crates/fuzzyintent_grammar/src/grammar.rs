//! Grammar: intents, rules, and reference resolution.
//!
//! A [`Grammar`] is assembled from one or more sentence sources with a
//! [`GrammarBuilder`]. Rule references are resolved only after every source is
//! loaded, so a rule may be used before (or in a different file than) it is
//! defined.

use indexmap::IndexMap;
use tracing::debug;

use fuzzyintent_foundation::{Error, ErrorContext, Result};

use crate::ast::Node;
use crate::sentences::parse_sections;
use crate::transform::WordTransform;

/// An intent and its sentence templates.
#[derive(Clone, Debug)]
pub struct Intent {
    /// Intent name.
    pub name: String,
    /// Sentence templates, in authored order.
    pub sentences: Vec<Node>,
    /// Source the intent was first declared in.
    pub source: String,
}

impl Intent {
    /// Returns the names of all slots referenced directly by the sentences.
    #[must_use]
    pub fn slot_refs(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sentences.iter().flat_map(Node::slot_refs).collect();
        names.dedup();
        names
    }
}

/// A named, reusable template local to an intent.
#[derive(Clone, Debug)]
pub struct Rule {
    /// Qualified name (`Intent.rule`).
    pub name: String,
    /// Owning intent.
    pub intent: String,
    /// Rule body.
    pub body: Node,
    /// Source the rule was defined in.
    pub source: String,
    /// Line of the definition.
    pub line: u32,
}

/// A resolved grammar.
///
/// Every `RuleRef` in a resolved grammar holds either a qualified rule name
/// (`Intent.rule`) or the name of an intent.
#[derive(Clone, Debug, Default)]
pub struct Grammar {
    intents: IndexMap<String, Intent>,
    rules: IndexMap<String, Rule>,
}

impl Grammar {
    /// Parses and resolves a single sentence source.
    ///
    /// # Errors
    /// Returns a syntax error or an unresolved reference error.
    pub fn parse(source: &str) -> Result<Self> {
        let mut builder = GrammarBuilder::new();
        builder.add_source("<input>", source)?;
        builder.build()
    }

    /// Iterates over intents in declaration order.
    pub fn intents(&self) -> impl Iterator<Item = &Intent> {
        self.intents.values()
    }

    /// Looks up an intent by name.
    #[must_use]
    pub fn intent(&self, name: &str) -> Option<&Intent> {
        self.intents.get(name)
    }

    /// Looks up a rule by qualified name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Iterates over all local rules.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Returns the number of intents.
    #[must_use]
    pub fn intent_count(&self) -> usize {
        self.intents.len()
    }

    /// Applies a word transform to every literal in the grammar.
    pub fn transform(&mut self, transform: &WordTransform) {
        for intent in self.intents.values_mut() {
            for sentence in &mut intent.sentences {
                transform.apply(sentence);
            }
        }
        for rule in self.rules.values_mut() {
            transform.apply(&mut rule.body);
        }
    }
}

/// Accumulates sentence sources into a [`Grammar`].
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    intents: IndexMap<String, Intent>,
    rules: IndexMap<String, Rule>,
}

impl GrammarBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a sentence source and merges its sections.
    ///
    /// Sections with the same name (in this or earlier sources) are merged.
    ///
    /// # Errors
    /// Returns a syntax error, or an error if a rule is defined twice.
    pub fn add_source(&mut self, source_name: &str, text: &str) -> Result<&mut Self> {
        let sections = parse_sections(source_name, text)?;
        debug!(source = source_name, sections = sections.len(), "parsed sentences");

        for section in sections {
            let intent = self
                .intents
                .entry(section.name.clone())
                .or_insert_with(|| Intent {
                    name: section.name.clone(),
                    sentences: Vec::new(),
                    source: source_name.to_string(),
                });
            intent.sentences.extend(section.sentences);

            for def in section.rules {
                let name = format!("{}.{}", section.name, def.name);
                if let Some(existing) = self.rules.get(&name) {
                    return Err(Error::syntax(
                        format!(
                            "rule {name} is already defined at {}:{}",
                            existing.source, existing.line
                        ),
                        def.line,
                        1,
                        String::new(),
                    )
                    .in_source(source_name));
                }
                self.rules.insert(
                    name.clone(),
                    Rule {
                        name,
                        intent: section.name.clone(),
                        body: def.body,
                        source: source_name.to_string(),
                        line: def.line,
                    },
                );
            }
        }

        Ok(self)
    }

    /// Resolves all rule references and returns the grammar.
    ///
    /// # Errors
    /// Returns an unresolved reference error naming the first dangling
    /// reference and the rule that contains it.
    pub fn build(self) -> Result<Grammar> {
        let Self {
            mut intents,
            mut rules,
        } = self;

        let known_rules: Vec<String> = rules.keys().cloned().collect();
        let known_intents: Vec<String> = intents.keys().cloned().collect();
        let resolver = Resolver {
            rules: &known_rules,
            intents: &known_intents,
        };

        for intent in intents.values_mut() {
            for sentence in &mut intent.sentences {
                resolver
                    .resolve(sentence, &intent.name, &intent.name)
                    .map_err(|e| e.in_source(intent.source.clone()))?;
            }
        }

        for rule in rules.values_mut() {
            resolver.resolve(&mut rule.body, &rule.intent, &rule.name).map_err(|e| {
                e.with_context(
                    ErrorContext::new()
                        .with_source(rule.source.clone())
                        .with_position(rule.line as usize, 1),
                )
            })?;
        }

        debug!(
            intents = intents.len(),
            rules = rules.len(),
            "resolved grammar"
        );
        Ok(Grammar { intents, rules })
    }
}

/// Rewrites rule references to their qualified names.
struct Resolver<'a> {
    rules: &'a [String],
    intents: &'a [String],
}

impl Resolver<'_> {
    fn resolve(&self, node: &mut Node, intent: &str, owner: &str) -> Result<()> {
        let mut failure = None;
        node.walk_mut(&mut |n| {
            if failure.is_some() {
                return;
            }
            if let Node::RuleRef(name, _) = n {
                match self.qualify(name, intent) {
                    Some(qualified) => *name = qualified,
                    None => failure = Some(Error::unresolved(format!("<{name}>"), owner)),
                }
            }
        });
        failure.map_or(Ok(()), Err)
    }

    /// `<A.b>` names a local rule of `A`; `<b>` is a local rule of the
    /// current intent or, failing that, another intent.
    fn qualify(&self, name: &str, intent: &str) -> Option<String> {
        if name.contains('.') {
            return self.rules.iter().any(|r| r == name).then(|| name.to_string());
        }
        let local = format!("{intent}.{name}");
        if self.rules.contains(&local) {
            return Some(local);
        }
        self.intents
            .iter()
            .any(|i| i == name)
            .then(|| name.to_string())
    }
}
