//! Persisted highlight settings.
//!
//! The settings file is JSON. Phrase records use the short keys the client
//! has always written (`alert`, `sound`, `regex`, `case`, ...); every field
//! except `pattern` may be omitted.
//!
//! ```json
//! {
//!   "phrases": [
//!     { "pattern": "streamer", "sound": true, "color": "#7f7f3f49" },
//!     { "id": "b3c1...", "pattern": "^!\\w+", "regex": true, "showInMentions": false }
//!   ],
//!   "defaultSoundUrl": "sounds/ping2.wav",
//!   "redeemedHighlight": { "enabled": true },
//!   "subHighlight": { "enabled": false, "color": "#64c466ff" }
//! }
//! ```
//!
//! A phrase whose regex does not compile still loads; it is simply invalid
//! (see [`PhraseRule::is_valid`]). Only malformed JSON, bad colors and I/O
//! failures are errors here.

use crate::api::{CategoryStyle, ResolveOptions};
use crate::color::{Color, FALLBACK_HIGHLIGHT_COLOR, FALLBACK_REDEEMED_HIGHLIGHT_COLOR, FALLBACK_SUB_COLOR};
use crate::phrase::{PhraseFlags, PhraseRule};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Alert sound used when a sounding phrase has no custom URL.
pub const DEFAULT_ALERT_SOUND: &str = "sounds/ping2.wav";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("invalid highlight settings: {0}")]
    Json(#[from] serde_json::Error),
}

fn yes() -> bool {
    true
}

fn default_sound_url() -> String {
    DEFAULT_ALERT_SOUND.to_string()
}

/// One persisted phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseRecord {
    /// Missing ids are generated on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub pattern: String,
    #[serde(default = "yes")]
    pub show_in_mentions: bool,
    #[serde(default = "yes")]
    pub alert: bool,
    #[serde(default)]
    pub sound: bool,
    #[serde(default)]
    pub regex: bool,
    #[serde(default = "yes")]
    pub enabled: bool,
    #[serde(default, rename = "case")]
    pub case_sensitive: bool,
    #[serde(default)]
    pub sound_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl PhraseRecord {
    pub fn flags(&self) -> PhraseFlags {
        let mut flags = PhraseFlags::empty();
        flags.set(PhraseFlags::SHOW_IN_MENTIONS, self.show_in_mentions);
        flags.set(PhraseFlags::ALERT, self.alert);
        flags.set(PhraseFlags::SOUND, self.sound);
        flags.set(PhraseFlags::REGEX, self.regex);
        flags.set(PhraseFlags::ENABLED, self.enabled);
        flags.set(PhraseFlags::CASE_SENSITIVE, self.case_sensitive);
        flags
    }

    pub fn to_rule(&self) -> PhraseRule {
        let id = self.id.clone().unwrap_or_else(PhraseRule::generate_id);
        PhraseRule::new(id, self.pattern.clone(), self.flags(), self.sound_url.clone(), self.color)
    }

    pub fn from_rule(rule: &PhraseRule) -> Self {
        PhraseRecord {
            id: Some(rule.id().to_string()),
            pattern: rule.pattern().to_string(),
            show_in_mentions: rule.show_in_mentions(),
            alert: rule.has_alert(),
            sound: rule.has_sound(),
            regex: rule.is_regex(),
            enabled: rule.is_globally_enabled(),
            case_sensitive: rule.is_case_sensitive(),
            sound_url: rule.sound_url().to_string(),
            color: rule.color().map(|c| c.get()),
        }
    }
}

/// Highlight settings for a message category (redeemed / subscription).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryHighlight {
    #[serde(default = "yes")]
    pub enabled: bool,
    /// Overrides the built-in fallback color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl Default for CategoryHighlight {
    fn default() -> Self {
        CategoryHighlight { enabled: true, color: None }
    }
}

impl CategoryHighlight {
    fn style(&self, fallback: Color) -> CategoryStyle {
        CategoryStyle { enabled: self.enabled, color: self.color.unwrap_or(fallback) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightSettings {
    #[serde(default)]
    pub phrases: Vec<PhraseRecord>,
    #[serde(default = "default_sound_url")]
    pub default_sound_url: String,
    /// Overrides the fallback color for phrases without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_color: Option<Color>,
    #[serde(default)]
    pub redeemed_highlight: CategoryHighlight,
    #[serde(default)]
    pub sub_highlight: CategoryHighlight,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        HighlightSettings {
            phrases: Vec::new(),
            default_sound_url: default_sound_url(),
            highlight_color: None,
            redeemed_highlight: CategoryHighlight::default(),
            sub_highlight: CategoryHighlight::default(),
        }
    }
}

impl HighlightSettings {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mut settings: HighlightSettings = serde_json::from_str(json)?;
        settings.assign_missing_ids();
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let settings = Self::from_json_str(&content)?;
        log::info!("loaded {} highlight phrases from {}", settings.phrases.len(), path.display());
        Ok(settings)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        fs::write(path, self.to_json_string()?)
            .map_err(|source| ConfigError::Write { path: path.to_path_buf(), source })?;
        log::debug!("saved {} highlight phrases to {}", self.phrases.len(), path.display());
        Ok(())
    }

    /// Give every phrase without an id a fresh one, so ids stay stable from
    /// here on (including across a save).
    fn assign_missing_ids(&mut self) {
        for record in self.phrases.iter_mut().filter(|r| r.id.is_none()) {
            record.id = Some(PhraseRule::generate_id());
        }
    }

    /// Materialize the phrase records, in file order.
    pub fn to_rules(&self) -> Vec<PhraseRule> {
        self.phrases.iter().map(PhraseRecord::to_rule).collect()
    }

    /// Replace the phrase records with the current state of `rules`.
    pub fn set_rules(&mut self, rules: &[PhraseRule]) {
        self.phrases = rules.iter().map(PhraseRecord::from_rule).collect();
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            default_sound_url: self.default_sound_url.clone(),
            phrase_color: self.highlight_color.unwrap_or(FALLBACK_HIGHLIGHT_COLOR),
            redeemed: self.redeemed_highlight.style(FALLBACK_REDEEMED_HIGHLIGHT_COLOR),
            subscription: self.sub_highlight.style(FALLBACK_SUB_COLOR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "phrases": [
            { "id": "p1", "pattern": "streamer", "sound": true, "soundUrl": "custom.wav", "color": "#ff102030" },
            { "pattern": "^!\\w+", "regex": true, "showInMentions": false, "alert": false },
            { "id": "p3", "pattern": "f(oo", "regex": true, "case": true, "enabled": false }
        ],
        "subHighlight": { "enabled": false, "color": "#ff000000" }
    }"##;

    #[test]
    fn missing_fields_take_defaults() {
        let settings = HighlightSettings::from_json_str(SAMPLE).unwrap();
        assert_eq!(settings.phrases.len(), 3);

        let first = &settings.phrases[0];
        assert!(first.show_in_mentions && first.alert && first.enabled && first.sound);
        assert!(!first.regex && !first.case_sensitive);
        assert_eq!(first.color, Some(Color::rgba(0x10, 0x20, 0x30, 0xff)));

        assert_eq!(settings.default_sound_url, DEFAULT_ALERT_SOUND);
        assert!(settings.redeemed_highlight.enabled);
        assert!(!settings.sub_highlight.enabled);
    }

    #[test]
    fn missing_ids_are_generated_once() {
        let settings = HighlightSettings::from_json_str(SAMPLE).unwrap();
        let generated = settings.phrases[1].id.clone().unwrap();
        let rules = settings.to_rules();
        assert_eq!(rules[1].id(), generated);
        assert_eq!(settings.to_rules()[1].id(), generated);
    }

    #[test]
    fn invalid_regex_loads_as_invalid_rule() {
        let rules = HighlightSettings::from_json_str(SAMPLE).unwrap().to_rules();
        assert!(!rules[2].is_valid());
        assert!(rules[2].is_case_sensitive());
        assert!(!rules[2].is_globally_enabled());
    }

    #[test]
    fn bad_color_is_a_config_error() {
        let err = HighlightSettings::from_json_str(r#"{ "phrases": [{ "pattern": "x", "color": "blue" }] }"#);
        assert!(matches!(err, Err(ConfigError::Json(_))));
    }

    #[test]
    fn missing_pattern_is_a_config_error() {
        assert!(HighlightSettings::from_json_str(r#"{ "phrases": [{ "alert": true }] }"#).is_err());
    }

    #[test]
    fn rules_survive_a_save_cycle() {
        let settings = HighlightSettings::from_json_str(SAMPLE).unwrap();
        let json = settings.to_json_string().unwrap();
        let reloaded = HighlightSettings::from_json_str(&json).unwrap();

        assert_eq!(reloaded, settings);
        assert_eq!(reloaded.to_rules(), settings.to_rules());
    }

    #[test]
    fn set_rules_captures_current_colors() {
        let mut settings = HighlightSettings::from_json_str(SAMPLE).unwrap();
        let rules = settings.to_rules();
        rules[0].color().unwrap().set(Color::rgb(1, 2, 3));

        settings.set_rules(&rules);
        assert_eq!(settings.phrases[0].color, Some(Color::rgb(1, 2, 3)));
        assert_eq!(settings.phrases[1].color, None);
    }

    #[test]
    fn resolve_options_apply_overrides() {
        let opts = HighlightSettings::from_json_str(SAMPLE).unwrap().resolve_options();
        assert_eq!(opts.phrase_color, FALLBACK_HIGHLIGHT_COLOR);
        assert_eq!(opts.redeemed.color, FALLBACK_REDEEMED_HIGHLIGHT_COLOR);
        assert_eq!(opts.subscription, CategoryStyle { enabled: false, color: Color::rgba(0, 0, 0, 0xff) });
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(HighlightSettings::from_json_str("{}").unwrap(), HighlightSettings::default());
    }
}
