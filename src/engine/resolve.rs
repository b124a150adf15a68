//! Effect resolution.
//!
//! Matching yields a `MatchSet`; resolution folds the matched phrases into the
//! single `HighlightOutcome` consumed by the notification dispatcher (sound,
//! alert) and the renderer (color, mentions view).
//!
//! ```text
//! MatchSet ──┬─ show_in_mentions  = any(rule.show_in_mentions)
//!            ├─ play_sound        = any(rule.has_sound)
//!            ├─ sound             = first sounding rule with a custom URL, else Default
//!            ├─ alert             = any(rule.has_alert)
//!            └─ color             = first rule with a color, else category fallback
//! ```
//!
//! "First" always means iteration order of the rule snapshot.
//!
//! When nothing matched the outcome is neutral, unless the message belongs to
//! a special category (redeemed highlight, subscription) whose own highlight
//! is enabled; then it is colored with that category's color and triggers
//! nothing else.

use super::matcher::MatchSet;
use crate::api::ResolveOptions;
use crate::color::Color;
use crate::{HighlightCategory, MessageFlags};

/// Which alert sound to play.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Sound {
    #[default]
    Default,
    Custom(String),
}

impl Sound {
    /// The URL to play, given the configured default.
    pub fn url<'a>(&'a self, default: &'a str) -> &'a str {
        match self {
            Sound::Default => default,
            Sound::Custom(url) => url,
        }
    }
}

/// Resolved effects for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightOutcome {
    pub highlighted: bool,
    pub category: HighlightCategory,
    pub show_in_mentions: bool,
    pub play_sound: bool,
    pub sound: Sound,
    pub alert: bool,
    pub color: Option<Color>,
    /// Identifiers of the phrases that contributed, in iteration order.
    pub matched: Vec<String>,
}

impl HighlightOutcome {
    /// The neutral outcome: no highlight, no side effects.
    pub fn none() -> Self {
        HighlightOutcome {
            highlighted: false,
            category: HighlightCategory::Phrase,
            show_in_mentions: false,
            play_sound: false,
            sound: Sound::Default,
            alert: false,
            color: None,
            matched: Vec::new(),
        }
    }

    pub fn is_none(&self) -> bool {
        !self.highlighted
    }
}

impl Default for HighlightOutcome {
    fn default() -> Self {
        HighlightOutcome::none()
    }
}

/// Fold `matched` into one outcome for a message carrying `flags`.
pub fn resolve(matched: &MatchSet<'_>, flags: MessageFlags, options: &ResolveOptions) -> HighlightOutcome {
    let category = HighlightCategory::from_flags(flags);

    if matched.is_empty() {
        if category != HighlightCategory::Phrase && options.category_enabled(category) {
            log::trace!("[resolve] no phrase matched, {:?} category highlight", category);
            return HighlightOutcome {
                highlighted: true,
                category,
                color: Some(options.fallback_color(category)),
                ..HighlightOutcome::none()
            };
        }
        return HighlightOutcome::none();
    }

    let mut outcome = HighlightOutcome { highlighted: true, category, ..HighlightOutcome::none() };

    for rule in matched.iter() {
        outcome.show_in_mentions |= rule.show_in_mentions();
        outcome.alert |= rule.has_alert();

        if rule.has_sound() {
            outcome.play_sound = true;
            if outcome.sound == Sound::Default && rule.has_custom_sound() {
                outcome.sound = Sound::Custom(rule.sound_url().to_string());
            }
        }

        if outcome.color.is_none() {
            outcome.color = rule.color().map(|c| c.get());
        }

        outcome.matched.push(rule.id().to_string());
    }

    if outcome.color.is_none() {
        outcome.color = Some(options.fallback_color(category));
    }

    log::trace!(
        "[resolve] matched={:?} mentions={} sound={} alert={} color={:?}",
        outcome.matched,
        outcome.show_in_mentions,
        outcome.play_sound,
        outcome.alert,
        outcome.color
    );

    outcome
}
