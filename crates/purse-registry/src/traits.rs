use purse_types::StyleRule;

use crate::error::SinkResult;

/// Ticket for one rule held by a sink.
///
/// Handing it back to [`StyleSink::retract`] removes exactly that rule.
/// Handles are not `Clone`, so a rule can be retracted at most once.
#[must_use = "a rule can only be retracted through its handle"]
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct RuleHandle(u64);

impl RuleHandle {
    /// Create a handle. Only sinks should mint handles.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Destination for compiled style rules.
///
/// Implementations must satisfy these invariants:
/// - Every successful `add_rule` holds the rule until its handle is retracted.
/// - Adding the same rule text twice holds it twice; the sink does no
///   deduplication of its own (that is the registry's job).
/// - `retract` affects only the rule its handle was issued for. Retracting a
///   handle the sink does not know is a no-op.
pub trait StyleSink {
    /// Add one rule and return the handle that retracts it.
    fn add_rule(&mut self, rule: &StyleRule) -> SinkResult<RuleHandle>;

    /// Add a rule that is not associated with a generated class name.
    ///
    /// Default implementation calls `add_rule()`. Sinks may override to keep
    /// global rules apart.
    fn add_global_rule(&mut self, rule: &StyleRule) -> SinkResult<RuleHandle> {
        self.add_rule(rule)
    }

    /// Remove the rule behind `handle`.
    fn retract(&mut self, handle: RuleHandle);
}

impl<S: StyleSink + ?Sized> StyleSink for &mut S {
    fn add_rule(&mut self, rule: &StyleRule) -> SinkResult<RuleHandle> {
        (**self).add_rule(rule)
    }

    fn add_global_rule(&mut self, rule: &StyleRule) -> SinkResult<RuleHandle> {
        (**self).add_global_rule(rule)
    }

    fn retract(&mut self, handle: RuleHandle) {
        (**self).retract(handle)
    }
}

impl<S: StyleSink + ?Sized> StyleSink for Box<S> {
    fn add_rule(&mut self, rule: &StyleRule) -> SinkResult<RuleHandle> {
        (**self).add_rule(rule)
    }

    fn add_global_rule(&mut self, rule: &StyleRule) -> SinkResult<RuleHandle> {
        (**self).add_global_rule(rule)
    }

    fn retract(&mut self, handle: RuleHandle) {
        (**self).retract(handle)
    }
}
