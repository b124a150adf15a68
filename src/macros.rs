/// Lazily compiled static regex. Only for patterns known at compile time;
/// user-supplied phrases go through `engine::compile`.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`PhraseRule`](crate::PhraseRule) with named fields.
///
/// Unspecified flags default to off except `enabled`, which defaults to on.
/// Optional fields must appear in declaration order: `mentions`, `alert`,
/// `sound`, `regex`, `enabled`, `case_sensitive`, `sound_url`, `color`.
///
/// ```
/// use hilite::phrase;
///
/// let rule = phrase! {
///     id: "greeting",
///     pattern: "hello",
///     mentions: true,
///     sound: true,
/// };
/// assert!(rule.is_valid());
/// assert!(rule.show_in_mentions());
/// ```
#[macro_export]
macro_rules! phrase {
    (
        id: $id:expr,
        pattern: $pattern:expr
        $(, mentions: $mentions:expr)?
        $(, alert: $alert:expr)?
        $(, sound: $sound:expr)?
        $(, regex: $regex:expr)?
        $(, enabled: $enabled:expr)?
        $(, case_sensitive: $case:expr)?
        $(, sound_url: $url:expr)?
        $(, color: $color:expr)?
        $(,)?
    ) => {{
        #[allow(unused_mut)]
        let mut flags = $crate::PhraseFlags::ENABLED;
        $( flags.set($crate::PhraseFlags::SHOW_IN_MENTIONS, $mentions); )?
        $( flags.set($crate::PhraseFlags::ALERT, $alert); )?
        $( flags.set($crate::PhraseFlags::SOUND, $sound); )?
        $( flags.set($crate::PhraseFlags::REGEX, $regex); )?
        $( flags.set($crate::PhraseFlags::ENABLED, $enabled); )?
        $( flags.set($crate::PhraseFlags::CASE_SENSITIVE, $case); )?
        let sound_url: &str = None::<&str>$(.or(Some($url)))?.unwrap_or("");
        let color: Option<$crate::Color> = None$(.or(Some($color)))?;
        $crate::PhraseRule::new($id, $pattern, flags, sound_url, color)
    }};
}
