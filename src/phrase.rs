//! The highlight phrase model.
//!
//! A `PhraseRule` is an immutable value: the pattern text, its matching flags,
//! the effects it triggers, and the matcher compiled from them. "Editing" a
//! phrase means building a replacement that keeps the same identifier, so
//! anything holding on to the id (message history, the mentions view) keeps
//! pointing at the right rule.
//!
//! ```text
//! PhraseRule::new(id, pattern, flags, sound_url, color)
//!        │
//!        ├─ pattern + REGEX + CASE_SENSITIVE ──▶ engine::compile ──▶ Matcher | CompileError
//!        └─ everything else is carried as-is
//! ```

use crate::color::{Color, SharedColor};
use crate::engine::{CompileError, Matcher, compile};
use std::fmt;

bitflags::bitflags! {
    /// Boolean attributes of a phrase.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PhraseFlags: u8 {
        const SHOW_IN_MENTIONS = 1 << 0;
        const ALERT            = 1 << 1;
        const SOUND            = 1 << 2;
        const REGEX            = 1 << 3;
        const ENABLED          = 1 << 4;
        const CASE_SENSITIVE   = 1 << 5;
    }
}

impl PhraseFlags {
    /// Flags that feed into the compiled matcher. Changing any of them
    /// requires a recompile; changing the others does not.
    pub const MATCHER_INPUTS: PhraseFlags = PhraseFlags::REGEX.union(PhraseFlags::CASE_SENSITIVE);
}

impl Default for PhraseFlags {
    /// Settings for a phrase freshly added by the user.
    fn default() -> Self {
        PhraseFlags::SHOW_IN_MENTIONS | PhraseFlags::ALERT | PhraseFlags::ENABLED
    }
}

#[derive(Clone)]
pub struct PhraseRule {
    id: String,
    pattern: String,
    flags: PhraseFlags,
    sound_url: String,
    color: Option<SharedColor>,
    matcher: Result<Matcher, CompileError>,
}

impl PhraseRule {
    /// Create a phrase owning a fresh color cell.
    pub fn new(
        id: impl Into<String>,
        pattern: impl Into<String>,
        flags: PhraseFlags,
        sound_url: impl Into<String>,
        color: Option<Color>,
    ) -> Self {
        Self::with_shared_color(id, pattern, flags, sound_url, color.map(SharedColor::new))
    }

    /// Create a phrase that references an existing color cell, e.g. when
    /// cloning or importing a phrase whose color is also held elsewhere.
    pub fn with_shared_color(
        id: impl Into<String>,
        pattern: impl Into<String>,
        flags: PhraseFlags,
        sound_url: impl Into<String>,
        color: Option<SharedColor>,
    ) -> Self {
        let pattern = pattern.into();
        let matcher = compile(&pattern, flags.contains(PhraseFlags::REGEX), flags.contains(PhraseFlags::CASE_SENSITIVE));
        PhraseRule { id: id.into(), pattern, flags, sound_url: sound_url.into(), color, matcher }
    }

    /// A new random identifier for a phrase created by the user.
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    // --- Replacements ---------------------------------------------------------

    /// Same phrase with a different pattern (recompiles).
    pub fn with_pattern(&self, pattern: impl Into<String>) -> Self {
        Self::with_shared_color(self.id.clone(), pattern, self.flags, self.sound_url.clone(), self.color.clone())
    }

    /// Same phrase with different flags. The matcher is only rebuilt when
    /// `REGEX` or `CASE_SENSITIVE` change.
    pub fn with_flags(&self, flags: PhraseFlags) -> Self {
        if (flags ^ self.flags).intersects(PhraseFlags::MATCHER_INPUTS) {
            return Self::with_shared_color(
                self.id.clone(),
                self.pattern.clone(),
                flags,
                self.sound_url.clone(),
                self.color.clone(),
            );
        }
        PhraseRule { flags, ..self.clone() }
    }

    pub fn with_enabled(&self, enabled: bool) -> Self {
        let mut flags = self.flags;
        flags.set(PhraseFlags::ENABLED, enabled);
        self.with_flags(flags)
    }

    pub fn with_sound_url(&self, sound_url: impl Into<String>) -> Self {
        PhraseRule { sound_url: sound_url.into(), ..self.clone() }
    }

    pub fn with_color(&self, color: Option<SharedColor>) -> Self {
        PhraseRule { color, ..self.clone() }
    }

    // --- Accessors ------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn flags(&self) -> PhraseFlags {
        self.flags
    }

    pub fn show_in_mentions(&self) -> bool {
        self.flags.contains(PhraseFlags::SHOW_IN_MENTIONS)
    }

    pub fn has_alert(&self) -> bool {
        self.flags.contains(PhraseFlags::ALERT)
    }

    pub fn has_sound(&self) -> bool {
        self.flags.contains(PhraseFlags::SOUND)
    }

    /// True when a sound URL overrides the default alert sound.
    pub fn has_custom_sound(&self) -> bool {
        !self.sound_url.is_empty()
    }

    /// Empty means "use the default alert sound".
    pub fn sound_url(&self) -> &str {
        &self.sound_url
    }

    pub fn is_regex(&self) -> bool {
        self.flags.contains(PhraseFlags::REGEX)
    }

    pub fn is_globally_enabled(&self) -> bool {
        self.flags.contains(PhraseFlags::ENABLED)
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.flags.contains(PhraseFlags::CASE_SENSITIVE)
    }

    pub fn color(&self) -> Option<&SharedColor> {
        self.color.as_ref()
    }

    /// Valid iff the pattern is non-empty and compiled.
    pub fn is_valid(&self) -> bool {
        !self.pattern.is_empty() && self.matcher.is_ok()
    }

    /// Why this phrase is invalid, if it is.
    pub fn compile_error(&self) -> Option<&CompileError> {
        self.matcher.as_ref().err()
    }

    pub fn matcher(&self) -> Option<&Matcher> {
        self.matcher.as_ref().ok()
    }

    /// Existence test against `subject`. Invalid phrases never match.
    /// Does not look at the enabled flag; see [`crate::evaluate`].
    pub fn is_match(&self, subject: &str) -> bool {
        self.is_valid() && self.matcher.as_ref().is_ok_and(|m| m.is_match(subject))
    }
}

impl PartialEq for PhraseRule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.pattern == other.pattern
            && self.flags == other.flags
            && self.sound_url == other.sound_url
            && self.color == other.color
    }
}

impl Eq for PhraseRule {}

impl fmt::Debug for PhraseRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhraseRule")
            .field("id", &self.id)
            .field("pattern", &self.pattern)
            .field("flags", &self.flags)
            .field("sound_url", &self.sound_url)
            .field("color", &self.color)
            .field("valid", &self.is_valid())
            .finish()
    }
}
