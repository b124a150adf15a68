//! Per-message evaluation.
//!
//! This is the hot path: it runs once for every chat line on every channel.
//! Every enabled, valid phrase is tested independently; a match from one
//! phrase never stops the others, because one message can need the mention
//! flag from one phrase and the sound from another.
//!
//! ```text
//! subject ──▶ for rule in rules (iteration order)
//!               ├─ disabled?  skip
//!               ├─ invalid?   skip
//!               └─ matcher.is_match(subject) ──▶ push to MatchSet
//! ```
//!
//! No compilation happens here: matchers are built with their phrase. The
//! only allocation is the `MatchSet` itself, bounded by the rule count.

use super::metrics::EvalMetrics;
use super::snapshot::RuleId;
use crate::phrase::PhraseRule;
use std::time::Instant;

/// Phrases that matched one message, in iteration order.
#[derive(Debug, Clone, Default)]
pub struct MatchSet<'a> {
    matched: Vec<&'a PhraseRule>,
}

impl<'a> MatchSet<'a> {
    pub fn empty() -> Self {
        MatchSet { matched: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn rules(&self) -> &[&'a PhraseRule] {
        &self.matched
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a PhraseRule> + '_ {
        self.matched.iter().copied()
    }

    /// Identifiers of the matched phrases.
    pub fn ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.matched.iter().map(|r| r.id())
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.matched.iter().any(|r| r.id() == identifier)
    }
}

/// Evaluate `rules` against `subject`, skipping disabled and invalid phrases.
pub fn evaluate<'a>(rules: &'a [PhraseRule], subject: &str) -> MatchSet<'a> {
    let matched: Vec<&PhraseRule> =
        rules.iter().filter(|r| r.is_globally_enabled() && r.is_valid() && r.is_match(subject)).collect();

    log::trace!("[evaluate] {} of {} phrases matched", matched.len(), rules.len());

    MatchSet { matched }
}

/// Like [`evaluate`], also returning counters and timing.
pub fn evaluate_with_metrics<'a>(rules: &'a [PhraseRule], subject: &str) -> (MatchSet<'a>, EvalMetrics) {
    let start = Instant::now();
    let mut metrics = EvalMetrics::default();
    let mut matched = Vec::new();

    for rule in rules {
        if !rule.is_globally_enabled() {
            metrics.skipped_disabled += 1;
            continue;
        }
        if !rule.is_valid() {
            metrics.skipped_invalid += 1;
            continue;
        }
        metrics.rules_considered += 1;
        if rule.is_match(subject) {
            matched.push(rule);
        }
    }

    metrics.matched = matched.len();
    metrics.matching = start.elapsed();
    (MatchSet { matched }, metrics)
}

/// Evaluate only the positions listed in `active` (already known to be
/// enabled and valid).
pub(crate) fn evaluate_indexed<'a>(rules: &'a [PhraseRule], active: &[RuleId], subject: &str) -> MatchSet<'a> {
    let mut matched = Vec::new();
    for &id in active {
        let rule = &rules[id];
        if rule.is_match(subject) {
            log::trace!("[evaluate] phrase {} matched", rule.id());
            matched.push(rule);
        }
    }
    MatchSet { matched }
}

pub(crate) fn evaluate_indexed_with_metrics<'a>(
    rules: &'a [PhraseRule],
    active: &[RuleId],
    subject: &str,
) -> (MatchSet<'a>, EvalMetrics) {
    let start = Instant::now();
    let matched = evaluate_indexed(rules, active, subject);
    let metrics = EvalMetrics {
        matching: start.elapsed(),
        rules_considered: active.len(),
        matched: matched.len(),
        ..EvalMetrics::default()
    };
    (matched, metrics)
}
