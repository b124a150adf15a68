//! Rule snapshots.
//!
//! This module holds the *static* side of the engine: an ordered, immutable
//! collection of phrases plus a small index computed once when the snapshot
//! is built, so the per-message path never re-checks flags or validity.
//!
//! Evaluation is split in two phases:
//!
//! 1. **Build** (this module): phrases arrive already compiled (see
//!    `compiler.rs`); `RuleSet::new` sorts their positions into active,
//!    disabled and invalid buckets and logs invalid ones once.
//! 2. **Run** (see `matcher.rs`): each message is tested against the active
//!    bucket only.
//!
//! ## Invariants
//!
//! - `RuleId` is a position in `RuleSet::rules`; every id appears in exactly
//!   one index bucket.
//! - Each bucket is sorted ascending, so evaluation preserves iteration order.
//! - A snapshot never changes after construction. Edits go through
//!   [`RuleSet::with_rule`] / [`RuleSet::without`], which return a new one.

use super::matcher::{self, MatchSet};
use super::metrics::EvalMetrics;
use crate::phrase::PhraseRule;

/// Position of a phrase inside a [`RuleSet`].
pub type RuleId = usize;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RuleIndex {
    /// Enabled and valid: these are the only rules evaluated per message.
    pub active: Vec<RuleId>,
    /// Globally disabled (regardless of validity).
    pub disabled: Vec<RuleId>,
    /// Enabled but empty or failed to compile.
    pub invalid: Vec<RuleId>,
}

#[derive(Debug, Default, Clone)]
pub struct RuleSet {
    rules: Vec<PhraseRule>,
    index: RuleIndex,
}

impl RuleSet {
    /// Build a snapshot from an ordered list of phrases.
    pub fn new(rules: Vec<PhraseRule>) -> Self {
        let mut index = RuleIndex::default();

        for (id, rule) in rules.iter().enumerate() {
            if !rule.is_globally_enabled() {
                index.disabled.push(id);
            } else if !rule.is_valid() {
                match rule.compile_error() {
                    Some(err) => log::warn!("highlight phrase {} ({:?}) is invalid: {}", rule.id(), rule.pattern(), err),
                    None => log::warn!("highlight phrase {} is invalid", rule.id()),
                }
                index.invalid.push(id);
            } else {
                index.active.push(id);
            }
        }

        log::debug!(
            "[snapshot] {} phrases: {} active, {} disabled, {} invalid",
            rules.len(),
            index.active.len(),
            index.disabled.len(),
            index.invalid.len()
        );

        RuleSet { rules, index }
    }

    pub fn empty() -> Self {
        RuleSet::default()
    }

    pub fn rules(&self) -> &[PhraseRule] {
        &self.rules
    }

    pub fn index(&self) -> &RuleIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, id: RuleId) -> Option<&PhraseRule> {
        self.rules.get(id)
    }

    /// Look a phrase up by its stable identifier.
    pub fn find(&self, identifier: &str) -> Option<&PhraseRule> {
        self.rules.iter().find(|r| r.id() == identifier)
    }

    /// Phrases that are enabled but cannot match, in iteration order.
    pub fn invalid_rules(&self) -> impl Iterator<Item = &PhraseRule> + '_ {
        self.index.invalid.iter().map(|&id| &self.rules[id])
    }

    /// New snapshot with `rule` replacing the phrase that has the same
    /// identifier, or appended when there is none.
    pub fn with_rule(&self, rule: PhraseRule) -> RuleSet {
        let mut rules = self.rules.clone();
        match rules.iter_mut().find(|r| r.id() == rule.id()) {
            Some(slot) => *slot = rule,
            None => rules.push(rule),
        }
        RuleSet::new(rules)
    }

    /// New snapshot without the phrase identified by `identifier`.
    pub fn without(&self, identifier: &str) -> RuleSet {
        RuleSet::new(self.rules.iter().filter(|r| r.id() != identifier).cloned().collect())
    }

    /// Run every active phrase against `subject`.
    pub fn evaluate(&self, subject: &str) -> MatchSet<'_> {
        matcher::evaluate_indexed(&self.rules, &self.index.active, subject)
    }

    /// Like [`RuleSet::evaluate`], also returning counters and timing.
    pub fn evaluate_with_metrics(&self, subject: &str) -> (MatchSet<'_>, EvalMetrics) {
        let (matched, mut metrics) = matcher::evaluate_indexed_with_metrics(&self.rules, &self.index.active, subject);
        metrics.skipped_disabled = self.index.disabled.len();
        metrics.skipped_invalid = self.index.invalid.len();
        (matched, metrics)
    }
}

impl From<Vec<PhraseRule>> for RuleSet {
    fn from(rules: Vec<PhraseRule>) -> Self {
        RuleSet::new(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RuleSet {
        RuleSet::new(vec![
            phrase! { id: "a", pattern: "alpha" },
            phrase! { id: "b", pattern: "f(oo", regex: true },
            phrase! { id: "c", pattern: "gamma", enabled: false },
            phrase! { id: "d", pattern: "" },
            phrase! { id: "e", pattern: "", enabled: false },
            phrase! { id: "f", pattern: "delta" },
        ])
    }

    #[test]
    fn index_partitions_every_rule_once() {
        let set = sample();
        assert_eq!(set.index().active, vec![0, 5]);
        assert_eq!(set.index().disabled, vec![2, 4]);
        assert_eq!(set.index().invalid, vec![1, 3]);
        let ids: Vec<&str> = set.invalid_rules().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["b", "d"]);
    }

    #[test]
    fn with_rule_replaces_in_place() {
        let set = sample();
        let next = set.with_rule(phrase! { id: "c", pattern: "gamma" });

        assert_eq!(next.len(), set.len());
        assert_eq!(next.index().active, vec![0, 2, 5]);
        // The previous snapshot is untouched.
        assert_eq!(set.index().active, vec![0, 5]);
    }

    #[test]
    fn with_rule_appends_unknown_ids() {
        let next = sample().with_rule(phrase! { id: "z", pattern: "zeta" });
        assert_eq!(next.len(), 7);
        assert_eq!(next.rules().last().map(|r| r.id()), Some("z"));
    }

    #[test]
    fn without_removes_by_identifier() {
        let next = sample().without("a");
        assert!(next.find("a").is_none());
        assert_eq!(next.index().active, vec![4]);
    }

    #[test]
    fn metrics_account_for_skipped_rules() {
        let set = sample();
        let (matched, metrics) = set.evaluate_with_metrics("alpha and delta");
        assert_eq!(matched.len(), 2);
        assert_eq!(metrics.rules_considered, 2);
        assert_eq!(metrics.skipped_disabled, 2);
        assert_eq!(metrics.skipped_invalid, 2);
        assert_eq!(metrics.matched, 2);
    }
}
