//! Training: grammar and slots to an intent graph and examples index.

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, warn};

use fuzzyintent_foundation::{Error, Limit, Result, WordCasing};
use fuzzyintent_grammar::{CyclePolicy, Expander, Grammar, SlotStore, WordTransform};

use crate::builder::IntentGraphBuilder;
use crate::examples::ExamplesIndex;
use crate::graph::IntentGraph;

/// How to treat intents that produce no examples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Log a warning and leave the intent out.
    #[default]
    Warn,
    /// Fail training.
    Strict,
}

/// Training options.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Casing applied to grammar words.
    pub casing: WordCasing,
    /// Spell out numeric literals.
    pub replace_numbers: bool,
    /// Reaction to reference cycles.
    pub cycle_policy: CyclePolicy,
    /// Reaction to intents without examples.
    pub empty_intents: Strictness,
    /// Upper bound on the total number of examples.
    pub max_examples: Option<usize>,
}

impl TrainingConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower-cased words and spelled-out numbers, as used for voice input.
    #[must_use]
    pub fn voice() -> Self {
        Self {
            casing: WordCasing::Lower,
            replace_numbers: true,
            ..Self::default()
        }
    }

    /// Fails on every cycle and empty intent.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            cycle_policy: CyclePolicy::AbortAll,
            empty_intents: Strictness::Strict,
            ..Self::default()
        }
    }

    /// Sets word casing.
    #[must_use]
    pub const fn with_casing(mut self, casing: WordCasing) -> Self {
        self.casing = casing;
        self
    }

    /// Enables or disables number replacement.
    #[must_use]
    pub const fn with_replace_numbers(mut self, replace: bool) -> Self {
        self.replace_numbers = replace;
        self
    }

    /// Sets the cycle policy.
    #[must_use]
    pub const fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.cycle_policy = policy;
        self
    }

    /// Sets empty-intent strictness.
    #[must_use]
    pub const fn with_empty_intents(mut self, strictness: Strictness) -> Self {
        self.empty_intents = strictness;
        self
    }

    /// Caps the number of examples.
    #[must_use]
    pub const fn with_max_examples(mut self, limit: usize) -> Self {
        self.max_examples = Some(limit);
        self
    }

    /// The word transform this configuration applies.
    #[must_use]
    pub const fn transform(&self) -> WordTransform {
        WordTransform::new(self.casing, self.replace_numbers)
    }
}

/// Output of a training run.
#[derive(Debug)]
pub struct TrainedModel {
    /// Minimized intent graph.
    pub graph: IntentGraph,
    /// Examples per intent.
    pub examples: ExamplesIndex,
    /// Non-fatal problems: skipped cyclic intents and empty intents.
    pub warnings: Vec<Error>,
}

/// Expands a grammar and builds its artifacts.
///
/// The whole run happens in memory; nothing is produced unless every step
/// succeeds.
///
/// # Errors
/// Returns unresolved or cyclic reference errors from expansion, an empty
/// intent error under [`Strictness::Strict`], or a limit error when
/// `max_examples` is exceeded.
pub fn train(grammar: &Grammar, slots: &SlotStore, config: &TrainingConfig) -> Result<TrainedModel> {
    let _span = info_span!("train", intents = grammar.intent_count()).entered();

    let transform = config.transform();
    let transformed;
    let (grammar, slots) = if transform.is_identity() {
        (grammar, slots)
    } else {
        let mut g = grammar.clone();
        let mut s = slots.clone();
        g.transform(&transform);
        s.transform(&transform);
        transformed = (g, s);
        (&transformed.0, &transformed.1)
    };

    let mut expansion = Expander::new(grammar, slots)
        .with_cycle_policy(config.cycle_policy)
        .expand()?;

    let mut warnings = expansion.take_skipped();
    let mut builder = IntentGraphBuilder::new();
    let mut examples = ExamplesIndex::new();
    let mut total: u128 = 0;

    for (intent, _) in expansion.intents() {
        let count = expansion.example_count(intent);
        if count == 0 {
            let err = Error::empty_intent(intent);
            if config.empty_intents == Strictness::Strict {
                return Err(err);
            }
            warn!(intent, "intent has no examples");
            warnings.push(err);
            continue;
        }

        total = total.saturating_add(count);
        if let Some(limit) = config.max_examples {
            if total > limit as u128 {
                return Err(Error::limit_exceeded(Limit::MaxExamples {
                    limit,
                    intent: intent.to_string(),
                }));
            }
        }

        for example in expansion.examples(intent) {
            builder.insert(intent, &example);
            examples.insert(intent, example);
        }
        debug!(intent, examples = %count, "added intent");
    }

    let graph = builder.finish();
    debug!(
        intents = examples.intent_count(),
        examples = examples.len(),
        warnings = warnings.len(),
        "training finished"
    );
    Ok(TrainedModel {
        graph,
        examples,
        warnings,
    })
}
