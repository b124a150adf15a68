use crate::color::{Color, FALLBACK_HIGHLIGHT_COLOR, FALLBACK_REDEEMED_HIGHLIGHT_COLOR, FALLBACK_SUB_COLOR};
use crate::config::{DEFAULT_ALERT_SOUND, HighlightSettings};
use crate::engine::{EvalMetrics, HighlightOutcome, RuleSet, resolve};
use crate::phrase::PhraseRule;
use crate::{HighlightCategory, MessageFlags};
use std::ops::Range;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

/// Highlight settings for one message category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    /// Highlight messages of this category even when no phrase matched.
    pub enabled: bool,
    pub color: Color,
}

/// Options that affect resolution (not matching).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Played when a sounding phrase has no custom URL.
    pub default_sound_url: String,
    /// Color for matched phrases that carry none.
    pub phrase_color: Color,
    pub redeemed: CategoryStyle,
    pub subscription: CategoryStyle,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions {
            default_sound_url: DEFAULT_ALERT_SOUND.to_string(),
            phrase_color: FALLBACK_HIGHLIGHT_COLOR,
            redeemed: CategoryStyle { enabled: true, color: FALLBACK_REDEEMED_HIGHLIGHT_COLOR },
            subscription: CategoryStyle { enabled: true, color: FALLBACK_SUB_COLOR },
        }
    }
}

impl ResolveOptions {
    pub fn fallback_color(&self, category: HighlightCategory) -> Color {
        match category {
            HighlightCategory::Phrase => self.phrase_color,
            HighlightCategory::Redeemed => self.redeemed.color,
            HighlightCategory::Subscription => self.subscription.color,
        }
    }

    /// Whether messages of `category` are highlighted on their own.
    pub fn category_enabled(&self, category: HighlightCategory) -> bool {
        match category {
            HighlightCategory::Phrase => false,
            HighlightCategory::Redeemed => self.redeemed.enabled,
            HighlightCategory::Subscription => self.subscription.enabled,
        }
    }
}

/// Where a matched phrase was found in the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDetail {
    pub id: String,
    pub pattern: String,
    /// Byte span of the first occurrence.
    pub span: Range<usize>,
}

/// Result of [`Highlighter::check_verbose`].
///
/// Meant for debugging and configuration tooling; the plain
/// [`Highlighter::check`] path collects none of this.
#[derive(Debug, Clone)]
pub struct HighlightReport {
    pub text: String,
    pub flags: MessageFlags,
    pub outcome: HighlightOutcome,
    pub matches: Vec<MatchDetail>,
    /// `(id, error)` for enabled phrases that cannot match.
    pub invalid: Vec<(String, String)>,
    pub metrics: EvalMetrics,
}

/// Rules and resolve options that are swapped in together.
#[derive(Debug, Default, Clone)]
pub struct HighlightConfig {
    pub rules: Arc<RuleSet>,
    pub options: Arc<ResolveOptions>,
}

/// Current highlight configuration plus the per-message entry point.
///
/// Rules and options are held as one immutable snapshot. Replacing it swaps
/// an `Arc`; a check already running keeps the snapshot it started with.
/// Edits hold the write lock while they build on the current snapshot, so
/// concurrent edits are applied one after another.
#[derive(Debug, Default)]
pub struct Highlighter {
    current: RwLock<Arc<HighlightConfig>>,
}

impl Highlighter {
    pub fn new(rules: Vec<PhraseRule>, options: ResolveOptions) -> Self {
        let config = HighlightConfig { rules: Arc::new(RuleSet::new(rules)), options: Arc::new(options) };
        Highlighter { current: RwLock::new(Arc::new(config)) }
    }

    pub fn from_settings(settings: &HighlightSettings) -> Self {
        Highlighter::new(settings.to_rules(), settings.resolve_options())
    }

    /// The rules and options new checks will use.
    pub fn config(&self) -> Arc<HighlightConfig> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn rules(&self) -> Arc<RuleSet> {
        Arc::clone(&self.config().rules)
    }

    pub fn options(&self) -> Arc<ResolveOptions> {
        Arc::clone(&self.config().options)
    }

    fn update(&self, edit: impl FnOnce(&HighlightConfig) -> HighlightConfig) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let next = edit(&current);
        *current = Arc::new(next);
    }

    pub fn replace_rules(&self, rules: Vec<PhraseRule>) {
        self.replace_snapshot(Arc::new(RuleSet::new(rules)));
    }

    pub fn replace_snapshot(&self, snapshot: Arc<RuleSet>) {
        self.update(|config| HighlightConfig { rules: snapshot, options: Arc::clone(&config.options) });
    }

    /// Replace (or add) a single phrase, keyed by its identifier.
    pub fn upsert_rule(&self, rule: PhraseRule) {
        self.update(|config| HighlightConfig {
            rules: Arc::new(config.rules.with_rule(rule)),
            options: Arc::clone(&config.options),
        });
    }

    pub fn remove_rule(&self, identifier: &str) {
        self.update(|config| HighlightConfig {
            rules: Arc::new(config.rules.without(identifier)),
            options: Arc::clone(&config.options),
        });
    }

    pub fn set_options(&self, options: ResolveOptions) {
        self.update(|config| HighlightConfig { rules: Arc::clone(&config.rules), options: Arc::new(options) });
    }

    /// Reload everything from settings in a single swap.
    pub fn apply_settings(&self, settings: &HighlightSettings) {
        let next = HighlightConfig {
            rules: Arc::new(RuleSet::new(settings.to_rules())),
            options: Arc::new(settings.resolve_options()),
        };
        self.update(|_| next);
    }

    /// Evaluate and resolve one chat line.
    pub fn check(&self, text: &str, flags: MessageFlags) -> HighlightOutcome {
        let config = self.config();
        let matched = config.rules.evaluate(text);
        resolve(&matched, flags, &config.options)
    }

    /// Like [`Highlighter::check`], with match spans, invalid phrases and
    /// timings.
    pub fn check_verbose(&self, text: &str, flags: MessageFlags) -> HighlightReport {
        let total_start = Instant::now();
        let config = self.config();
        let (rules, options) = (&config.rules, &config.options);

        let (matched, mut metrics) = rules.evaluate_with_metrics(text);

        let resolve_start = Instant::now();
        let outcome = resolve(&matched, flags, options);
        metrics.resolve = resolve_start.elapsed();

        let matches = matched
            .iter()
            .filter_map(|rule| {
                let span = rule.matcher()?.find(text)?;
                Some(MatchDetail { id: rule.id().to_string(), pattern: rule.pattern().to_string(), span })
            })
            .collect();

        let invalid = rules
            .invalid_rules()
            .map(|rule| {
                let reason = rule.compile_error().map(|e| e.to_string()).unwrap_or_else(|| "invalid".to_string());
                (rule.id().to_string(), reason)
            })
            .collect();

        metrics.total = total_start.elapsed();

        HighlightReport { text: text.to_string(), flags, outcome, matches, invalid, metrics }
    }
}
