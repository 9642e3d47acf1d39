use purse_types::StyleRule;

use crate::error::SinkResult;
use crate::traits::{RuleHandle, StyleSink};

/// In-memory, ordered log of live rules.
///
/// Intended for tests and server-side rendering. Rules are kept in the order
/// they were added; retracting one leaves the relative order of the rest
/// unchanged.
#[derive(Default)]
pub struct InMemorySink {
    rules: Vec<(u64, StyleRule)>,
    next_id: u64,
}

impl InMemorySink {
    /// Create a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rules currently held.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rule is held.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Live rules in insertion order.
    pub fn rules(&self) -> Vec<&StyleRule> {
        self.rules.iter().map(|(_, rule)| rule).collect()
    }

    /// Returns `true` if a rule with exactly this text is held.
    pub fn contains(&self, rule: &str) -> bool {
        self.rules.iter().any(|(_, held)| held.as_str() == rule)
    }

    /// How many copies of this rule text are held.
    pub fn count(&self, rule: &str) -> usize {
        self.rules.iter().filter(|(_, held)| held.as_str() == rule).count()
    }

    /// Drop every rule. Outstanding handles become no-ops.
    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// All rules joined with newlines.
    pub fn to_css(&self) -> String {
        self.rules
            .iter()
            .map(|(_, rule)| rule.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl StyleSink for InMemorySink {
    fn add_rule(&mut self, rule: &StyleRule) -> SinkResult<RuleHandle> {
        let id = self.next_id;
        self.next_id += 1;
        self.rules.push((id, rule.clone()));
        Ok(RuleHandle::new(id))
    }

    fn retract(&mut self, handle: RuleHandle) {
        if let Some(pos) = self.rules.iter().position(|(id, _)| *id == handle.id()) {
            self.rules.remove(pos);
        }
    }
}

impl std::fmt::Debug for InMemorySink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySink")
            .field("rule_count", &self.len())
            .finish()
    }
}
