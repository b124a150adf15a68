//! Highlight matching engine.
//!
//! The engine is split into focused submodules under `src/engine/`. Public
//! paths stay flat (`crate::engine::compile`, `crate::engine::RuleSet`, ...).
//!
//! ## How the parts work together
//!
//! ```text
//! PhraseRule (pattern + flags)
//!        │  compile / wrap_literal            (compiler.rs)
//!        v
//!   Matcher | CompileError  (stored on the rule, once per rule change)
//!        │
//!        │  RuleSet::new                      (snapshot.rs)
//!        v
//!   RuleSet { rules, index: active / disabled / invalid }
//!        │
//! text ──┼─ RuleSet::evaluate                 (matcher.rs)
//!        │    - only active rules are run
//!        │    - existence test, no short-circuit
//!        v
//!   MatchSet (iteration order)
//!        │
//! flags ─┼─ resolve                           (resolve.rs)
//!        v
//!   HighlightOutcome
//! ```
//!
//! Compilation happens when a rule is built, never per message. A `RuleSet`
//! is an immutable snapshot: configuration changes produce a new one and
//! in-flight evaluations keep the one they started with.
//!
//! ## Responsibilities by module
//!
//! - `compiler.rs`: pattern + flags to a `Matcher`, literal boundary wrapping.
//! - `snapshot.rs`: the ordered rule snapshot and its active/disabled/invalid
//!   index.
//! - `matcher.rs`: per-message evaluation producing a `MatchSet`.
//! - `resolve.rs`: folds matched rules into one `HighlightOutcome`.
//! - `metrics.rs`: optional counters and timings for a single evaluation.
//!
//! ## Debugging
//!
//! Run with `RUST_LOG=hilite=debug` to log snapshot summaries and per-message
//! match traces.

#[path = "engine/compiler.rs"]
mod compiler;
#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/snapshot.rs"]
mod snapshot;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub use compiler::{CompileError, Matcher, compile, wrap_literal};
pub use matcher::{MatchSet, evaluate, evaluate_with_metrics};
pub use metrics::EvalMetrics;
pub use resolve::{HighlightOutcome, Sound, resolve};
pub use snapshot::{RuleId, RuleIndex, RuleSet};
