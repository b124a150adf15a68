extern crate self as hilite;

#[macro_use]
mod macros;
mod api;
mod color;
mod config;
mod engine;
mod phrase;

pub use api::{CategoryStyle, HighlightConfig, HighlightReport, Highlighter, MatchDetail, ResolveOptions};
pub use color::{
    Color, ColorParseError, FALLBACK_HIGHLIGHT_COLOR, FALLBACK_REDEEMED_HIGHLIGHT_COLOR, FALLBACK_SUB_COLOR,
    SharedColor,
};
pub use config::{CategoryHighlight, ConfigError, DEFAULT_ALERT_SOUND, HighlightSettings, PhraseRecord};
pub use engine::{
    CompileError, EvalMetrics, HighlightOutcome, MatchSet, Matcher, RuleId, RuleIndex, RuleSet, Sound, compile,
    evaluate, evaluate_with_metrics, resolve, wrap_literal,
};
pub use phrase::{PhraseFlags, PhraseRule};

// --- Shared types -----------------------------------------------------------

bitflags::bitflags! {
    /// Classification of an incoming chat line, supplied by the message source.
    ///
    /// These flags never influence whether a phrase matches; they only select
    /// which fallback color (and optional category highlight) applies.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MessageFlags: u8 {
        /// The message was sent with the channel-points "highlight my message" reward.
        const REDEEMED_HIGHLIGHT = 1 << 0;
        /// The message is a subscription / resubscription event.
        const SUBSCRIPTION       = 1 << 1;
    }
}

/// Category a message's fallback color is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightCategory {
    Phrase,
    Redeemed,
    Subscription,
}

impl HighlightCategory {
    /// Pick the category for a message. Redeemed highlights take precedence
    /// over subscription events when a message carries both flags.
    pub fn from_flags(flags: MessageFlags) -> Self {
        if flags.contains(MessageFlags::REDEEMED_HIGHLIGHT) {
            HighlightCategory::Redeemed
        } else if flags.contains(MessageFlags::SUBSCRIPTION) {
            HighlightCategory::Subscription
        } else {
            HighlightCategory::Phrase
        }
    }
}
