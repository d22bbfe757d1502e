//! Grammar expansion.
//!
//! The [`Expander`] compiles every intent of a resolved [`Grammar`] into a
//! shared [`FragmentArena`]. Rules and slots are compiled once and referenced
//! by id afterwards. Examples are enumerated lazily from the arena with
//! [`ExampleIter`].
//!
//! Reference cycles are detected with an explicit chain of the rules and slots
//! currently being compiled:
//!
//! ```text
//! [A]
//! loop = again <loop>      A -> A.loop -> A.loop
//! ```

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, warn};

use fuzzyintent_foundation::{Error, ErrorKind, Result};

use crate::ast::Node;
use crate::converter::{Conversion, Converter};
use crate::example::{Example, ExampleToken, SlotRole, SlotTag};
use crate::fragment::{Fragment, FragmentArena, FragmentId};
use crate::grammar::Grammar;
use crate::slots::SlotStore;

/// What to do when an intent contains a reference cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CyclePolicy {
    /// Fail the whole expansion.
    #[default]
    AbortAll,
    /// Drop the offending intent and keep going.
    SkipIntent,
}

/// Compiles a grammar into a fragment DAG.
pub struct Expander<'g> {
    grammar: &'g Grammar,
    slots: &'g SlotStore,
    policy: CyclePolicy,
    arena: FragmentArena,
    rules: HashMap<String, FragmentId>,
    slot_fragments: HashMap<String, FragmentId>,
    chain: Vec<String>,
}

impl<'g> Expander<'g> {
    /// Creates an expander over a grammar and its slot values.
    #[must_use]
    pub fn new(grammar: &'g Grammar, slots: &'g SlotStore) -> Self {
        Self {
            grammar,
            slots,
            policy: CyclePolicy::default(),
            arena: FragmentArena::new(),
            rules: HashMap::new(),
            slot_fragments: HashMap::new(),
            chain: Vec::new(),
        }
    }

    /// Sets the cycle policy.
    #[must_use]
    pub const fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Expands every intent.
    ///
    /// # Errors
    /// Returns the first unresolved slot or (under [`CyclePolicy::AbortAll`])
    /// cyclic reference.
    pub fn expand(mut self) -> Result<Expansion> {
        let grammar = self.grammar;
        let mut intents = IndexMap::new();
        let mut skipped = Vec::new();

        for intent in grammar.intents() {
            match self.reference(&intent.name) {
                Ok(root) => {
                    debug!(
                        intent = %intent.name,
                        examples = self.arena.count(root),
                        "expanded intent"
                    );
                    intents.insert(intent.name.clone(), root);
                }
                Err(err)
                    if self.policy == CyclePolicy::SkipIntent
                        && matches!(err.kind, ErrorKind::CyclicReference { .. }) =>
                {
                    warn!(intent = %intent.name, error = %err, "skipping intent");
                    self.chain.clear();
                    skipped.push(err);
                }
                Err(err) => return Err(err),
            }
        }

        debug!(fragments = self.arena.len(), "expansion finished");
        Ok(Expansion {
            arena: self.arena,
            intents,
            skipped,
        })
    }

    /// Compiles a rule or intent by resolved name, memoized.
    fn reference(&mut self, name: &str) -> Result<FragmentId> {
        if let Some(&id) = self.rules.get(name) {
            return Ok(id);
        }
        self.enter(name)?;

        let grammar = self.grammar;
        let result = if let Some(rule) = grammar.rule(name) {
            self.compile(&rule.body)
        } else if let Some(intent) = grammar.intent(name) {
            intent
                .sentences
                .iter()
                .map(|sentence| self.compile(sentence))
                .collect::<Result<Vec<_>>>()
                .map(|roots| self.arena.alt(roots))
        } else {
            let owner = self.owner();
            Err(Error::unresolved(format!("<{name}>"), owner))
        };

        self.chain.pop();
        let id = result.map_err(|e| e.with_frame(name))?;
        self.rules.insert(name.to_string(), id);
        Ok(id)
    }

    /// Compiles `$name` into a tagged union of its values, memoized.
    fn slot(&mut self, name: &str) -> Result<FragmentId> {
        if let Some(&id) = self.slot_fragments.get(name) {
            return Ok(id);
        }
        let slots = self.slots;
        let Some(values) = slots.get(name) else {
            return Err(Error::unresolved(format!("${name}"), self.owner()));
        };

        let key = format!("${name}");
        self.enter(&key)?;
        let result = values
            .iter()
            .map(|value| self.compile(&value.body))
            .collect::<Result<Vec<_>>>();
        self.chain.pop();

        let union = result.map_err(|e| e.with_frame(key))?;
        let union = self.arena.alt(union);
        let id = self.arena.tagged(name, Vec::new(), union);
        self.slot_fragments.insert(name.to_string(), id);
        Ok(id)
    }

    fn compile(&mut self, node: &Node) -> Result<FragmentId> {
        match node {
            Node::Literal {
                text, substitution, ..
            } => Ok(self.arena.word(text.clone(), substitution.clone())),
            Node::Sequence(items, _) => {
                let children = items
                    .iter()
                    .map(|item| self.compile(item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(self.arena.seq(children))
            }
            Node::Alternation(branches, _) => {
                let children = branches
                    .iter()
                    .map(|branch| self.compile(branch))
                    .collect::<Result<Vec<_>>>()?;
                Ok(self.arena.alt(children))
            }
            Node::Optional(inner, _) => {
                let inner = self.compile(inner)?;
                Ok(self.arena.optional(inner))
            }
            Node::RuleRef(name, _) => self.reference(name),
            Node::SlotRef(name, _) => self.slot(name),
            Node::Tagged {
                tag,
                converters,
                node,
                ..
            } => {
                let inner = self.compile(node)?;
                Ok(self.arena.tagged(tag.clone(), converters.clone(), inner))
            }
            Node::Converted {
                node, converters, ..
            } => {
                let inner = self.compile(node)?;
                Ok(self.arena.converted(converters.clone(), inner))
            }
        }
    }

    /// Pushes a name onto the reference chain, failing if it is already there.
    fn enter(&mut self, name: &str) -> Result<()> {
        if self.chain.iter().any(|n| n == name) {
            let mut chain = self.chain.clone();
            chain.push(name.to_string());
            return Err(Error::cyclic(chain));
        }
        self.chain.push(name.to_string());
        Ok(())
    }

    fn owner(&self) -> String {
        self.chain.last().cloned().unwrap_or_default()
    }
}

/// The result of expanding a grammar.
#[derive(Debug)]
pub struct Expansion {
    arena: FragmentArena,
    intents: IndexMap<String, FragmentId>,
    skipped: Vec<Error>,
}

impl Expansion {
    /// Expands a grammar with the default cycle policy.
    ///
    /// # Errors
    /// See [`Expander::expand`].
    pub fn of(grammar: &Grammar, slots: &SlotStore) -> Result<Self> {
        Expander::new(grammar, slots).expand()
    }

    /// The shared fragment arena.
    #[must_use]
    pub const fn arena(&self) -> &FragmentArena {
        &self.arena
    }

    /// Intent names and their root fragments, in grammar order.
    pub fn intents(&self) -> impl Iterator<Item = (&str, FragmentId)> {
        self.intents.iter().map(|(name, &id)| (name.as_str(), id))
    }

    /// Returns the root fragment of an intent.
    #[must_use]
    pub fn root(&self, intent: &str) -> Option<FragmentId> {
        self.intents.get(intent).copied()
    }

    /// Number of examples an intent produces (saturating).
    #[must_use]
    pub fn example_count(&self, intent: &str) -> u128 {
        self.root(intent).map_or(0, |id| self.arena.count(id))
    }

    /// Lazily enumerates an intent's examples, first alternative first.
    ///
    /// Unknown intents yield nothing.
    #[must_use]
    pub fn examples(&self, intent: &str) -> ExampleIter<'_> {
        match self.root(intent) {
            Some(root) => ExampleIter::new(&self.arena, root),
            None => ExampleIter::exhausted(&self.arena),
        }
    }

    /// Cyclic reference errors for intents dropped under
    /// [`CyclePolicy::SkipIntent`].
    #[must_use]
    pub fn skipped(&self) -> &[Error] {
        &self.skipped
    }

    /// Moves the skipped-intent errors out of the expansion.
    pub fn take_skipped(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.skipped)
    }
}

#[derive(Clone, Debug)]
enum Work {
    Visit(FragmentId),
    CloseTag,
    /// Ends the converter chain of fragment `id` opened at token `start`.
    CloseConversion { id: FragmentId, start: usize },
}

/// A partially built example.
#[derive(Clone, Debug)]
struct Branch {
    tokens: Vec<ExampleToken>,
    pending: Vec<Work>,
    /// Open outermost slot and the index of its first token.
    slot: Option<(String, usize)>,
}

impl Branch {
    fn close_slot(&mut self) {
        let Some((name, start)) = self.slot.take() else {
            return;
        };
        let last = self.tokens.len().saturating_sub(1);
        for (i, token) in self.tokens.iter_mut().enumerate().skip(start) {
            let role = if i == start {
                SlotRole::Begin
            } else if i == last {
                SlotRole::End
            } else {
                SlotRole::Inside
            };
            token.slot = Some(SlotTag {
                name: name.clone(),
                role,
            });
        }
    }

    fn close_conversion(&mut self, converters: &[Converter], start: usize) {
        let len = self.tokens.len().saturating_sub(start);
        if len > 0 {
            self.tokens[start]
                .conversions
                .push(Conversion::new(converters.to_vec(), len));
        }
    }
}

/// Depth-first example enumerator over a fragment DAG.
pub struct ExampleIter<'a> {
    arena: &'a FragmentArena,
    stack: Vec<Branch>,
}

impl<'a> ExampleIter<'a> {
    /// Starts enumerating from a fragment.
    #[must_use]
    pub fn new(arena: &'a FragmentArena, root: FragmentId) -> Self {
        let stack = if arena.count(root) == 0 {
            Vec::new()
        } else {
            vec![Branch {
                tokens: Vec::new(),
                pending: vec![Work::Visit(root)],
                slot: None,
            }]
        };
        Self { arena, stack }
    }

    fn exhausted(arena: &'a FragmentArena) -> Self {
        Self {
            arena,
            stack: Vec::new(),
        }
    }
}

impl Iterator for ExampleIter<'_> {
    type Item = Example;

    fn next(&mut self) -> Option<Example> {
        loop {
            let branch = self.stack.last_mut()?;
            let Some(work) = branch.pending.pop() else {
                let done = self.stack.pop()?;
                return Some(Example::new(done.tokens));
            };

            let id = match work {
                Work::CloseTag => {
                    branch.close_slot();
                    continue;
                }
                Work::CloseConversion { id, start } => {
                    if let Fragment::Tagged { converters, .. } | Fragment::Converted { converters, .. } =
                        self.arena.get(id)
                    {
                        branch.close_conversion(converters, start);
                    }
                    continue;
                }
                Work::Visit(id) => id,
            };

            match self.arena.get(id) {
                Fragment::Empty => {}
                Fragment::Word { text, value } => branch.tokens.push(ExampleToken {
                    word: text.clone(),
                    value: value.clone(),
                    slot: None,
                    conversions: Vec::new(),
                }),
                Fragment::Seq(items) => {
                    branch
                        .pending
                        .extend(items.iter().rev().map(|&child| Work::Visit(child)));
                }
                Fragment::Alt(items) => {
                    let live: Vec<FragmentId> = items
                        .iter()
                        .copied()
                        .filter(|&child| self.arena.count(child) > 0)
                        .collect();
                    let Some(mut current) = self.stack.pop() else {
                        continue;
                    };
                    // Later alternatives sit below the first on the stack.
                    for &child in live.iter().skip(1).rev() {
                        let mut alternative = current.clone();
                        alternative.pending.push(Work::Visit(child));
                        self.stack.push(alternative);
                    }
                    if let Some(&first) = live.first() {
                        current.pending.push(Work::Visit(first));
                        self.stack.push(current);
                    }
                }
                Fragment::Tagged {
                    slot,
                    converters,
                    inner,
                } => {
                    if !converters.is_empty() {
                        branch.pending.push(Work::CloseConversion {
                            id,
                            start: branch.tokens.len(),
                        });
                    }
                    if branch.slot.is_none() {
                        branch.slot = Some((slot.clone(), branch.tokens.len()));
                        branch.pending.push(Work::CloseTag);
                    }
                    branch.pending.push(Work::Visit(*inner));
                }
                Fragment::Converted { inner, .. } => {
                    branch.pending.push(Work::CloseConversion {
                        id,
                        start: branch.tokens.len(),
                    });
                    branch.pending.push(Work::Visit(*inner));
                }
            }
        }
    }
}
