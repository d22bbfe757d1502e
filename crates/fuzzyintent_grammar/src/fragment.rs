//! Hash-consed fragment arena.
//!
//! Expanded templates are stored as a DAG of [`Fragment`]s. Structurally
//! identical fragments are interned once, so a rule or slot used from many
//! places is stored (and counted) a single time.

use std::collections::HashMap;

use crate::converter::Converter;

/// Handle to a fragment in a [`FragmentArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentId(u32);

impl FragmentId {
    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One node of the expansion DAG.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Fragment {
    /// Produces the empty word sequence.
    Empty,
    /// A single word with an optional output substitution.
    Word {
        /// Spoken text.
        text: String,
        /// Output text, if different from the spoken text.
        value: Option<String>,
    },
    /// Concatenation of children.
    Seq(Vec<FragmentId>),
    /// Union of children. `Alt([])` produces nothing.
    Alt(Vec<FragmentId>),
    /// Children words fill the named slot.
    Tagged {
        /// Slot name.
        slot: String,
        /// Converters applied to the slot value.
        converters: Vec<Converter>,
        /// Tagged fragment.
        inner: FragmentId,
    },
    /// Children outputs pass through converters.
    Converted {
        /// Converters, applied in order.
        converters: Vec<Converter>,
        /// Converted fragment.
        inner: FragmentId,
    },
}

/// Interning store for fragments.
#[derive(Clone, Debug)]
pub struct FragmentArena {
    fragments: Vec<Fragment>,
    counts: Vec<u128>,
    interned: HashMap<Fragment, FragmentId>,
}

impl Default for FragmentArena {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentArena {
    /// Creates an arena holding only the empty fragment.
    #[must_use]
    pub fn new() -> Self {
        let mut arena = Self {
            fragments: Vec::new(),
            counts: Vec::new(),
            interned: HashMap::new(),
        };
        arena.intern(Fragment::Empty);
        arena
    }

    /// The empty fragment.
    #[must_use]
    pub const fn empty(&self) -> FragmentId {
        FragmentId(0)
    }

    /// Interns a word.
    pub fn word(&mut self, text: impl Into<String>, value: Option<String>) -> FragmentId {
        self.intern(Fragment::Word {
            text: text.into(),
            value,
        })
    }

    /// Interns a concatenation.
    ///
    /// Empty children are dropped and nested sequences are flattened; a
    /// sequence of one child is that child.
    pub fn seq(&mut self, children: impl IntoIterator<Item = FragmentId>) -> FragmentId {
        let mut flat = Vec::new();
        for child in children {
            match &self.fragments[child.index()] {
                Fragment::Empty => {}
                Fragment::Seq(items) => flat.extend_from_slice(items),
                _ => flat.push(child),
            }
        }
        match flat.len() {
            0 => self.empty(),
            1 => flat[0],
            _ => self.intern(Fragment::Seq(flat)),
        }
    }

    /// Interns a union.
    ///
    /// Nested unions are flattened and repeated children removed, keeping the
    /// first occurrence; a union of one child is that child.
    pub fn alt(&mut self, children: impl IntoIterator<Item = FragmentId>) -> FragmentId {
        let mut flat: Vec<FragmentId> = Vec::new();
        for child in children {
            let nested = match &self.fragments[child.index()] {
                Fragment::Alt(items) => items.clone(),
                _ => vec![child],
            };
            for id in nested {
                if !flat.contains(&id) {
                    flat.push(id);
                }
            }
        }
        if flat.len() == 1 {
            flat[0]
        } else {
            self.intern(Fragment::Alt(flat))
        }
    }

    /// Interns `inner | empty`.
    pub fn optional(&mut self, inner: FragmentId) -> FragmentId {
        let empty = self.empty();
        self.alt([inner, empty])
    }

    /// Interns a slot-tagged fragment.
    pub fn tagged(
        &mut self,
        slot: impl Into<String>,
        converters: Vec<Converter>,
        inner: FragmentId,
    ) -> FragmentId {
        self.intern(Fragment::Tagged {
            slot: slot.into(),
            converters,
            inner,
        })
    }

    /// Interns a converted fragment. No converters means `inner` itself.
    pub fn converted(&mut self, converters: Vec<Converter>, inner: FragmentId) -> FragmentId {
        if converters.is_empty() {
            return inner;
        }
        self.intern(Fragment::Converted { converters, inner })
    }

    /// Returns a fragment.
    ///
    /// # Panics
    /// Panics if the id was not produced by this arena.
    #[must_use]
    pub fn get(&self, id: FragmentId) -> &Fragment {
        &self.fragments[id.index()]
    }

    /// Number of word sequences a fragment produces, saturating at `u128::MAX`.
    #[must_use]
    pub fn count(&self, id: FragmentId) -> u128 {
        self.counts[id.index()]
    }

    /// Number of distinct fragments stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Always false; the empty fragment is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn intern(&mut self, fragment: Fragment) -> FragmentId {
        if let Some(&id) = self.interned.get(&fragment) {
            return id;
        }
        let count = match &fragment {
            Fragment::Empty | Fragment::Word { .. } => 1,
            Fragment::Seq(items) => items
                .iter()
                .fold(1u128, |acc, id| acc.saturating_mul(self.counts[id.index()])),
            Fragment::Alt(items) => items
                .iter()
                .fold(0u128, |acc, id| acc.saturating_add(self.counts[id.index()])),
            Fragment::Tagged { inner, .. } | Fragment::Converted { inner, .. } => {
                self.counts[inner.index()]
            }
        };
        let id = FragmentId(u32::try_from(self.fragments.len()).unwrap_or(u32::MAX));
        self.fragments.push(fragment.clone());
        self.counts.push(count);
        self.interned.insert(fragment, id);
        id
    }
}
