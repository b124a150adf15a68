//! Phrase compilation.
//!
//! Turns a phrase's raw pattern and flags into a `Matcher`:
//!
//! ```text
//! literal:  "foo.bar"  ── regex::escape ──▶ "foo\.bar" ── wrap_literal ──▶ "(\b|\s|^)foo\.bar(\b|\s|$)"
//! regex:    "fo+"      ────────────────────────────────────────────────▶ "fo+"
//! ```
//!
//! Literal phrases only fire on word-like boundaries, so "foo" does not
//! trigger inside "barfoobar" but does in "foo!", "a foo" or at either end of
//! the message. Regex phrases are used verbatim; their authors handle
//! boundaries themselves.
//!
//! Unicode classes are always on (`\b`, `\s`, `\w` respect non-ASCII letters)
//! and case-insensitivity is a property of the compiled program rather than a
//! lowercase pass over the input.

use regex::{Regex, RegexBuilder};
use std::fmt;
use std::ops::Range;

const REGEX_START_BOUNDARY: &str = r"(\b|\s|^)";
const REGEX_END_BOUNDARY: &str = r"(\b|\s|$)";

#[derive(Debug, Clone, thiserror::Error)]
pub enum CompileError {
    #[error("pattern is empty")]
    EmptyPattern,
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern { pattern: String, source: regex::Error },
}

/// Executable form of a phrase pattern.
#[derive(Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// True if the pattern occurs anywhere in `subject`.
    #[inline]
    pub fn is_match(&self, subject: &str) -> bool {
        self.regex.is_match(subject)
    }

    /// Byte span of the first occurrence, for reporting.
    pub fn find(&self, subject: &str) -> Option<Range<usize>> {
        self.regex.find(subject).map(|m| m.range())
    }

    /// The effective regular expression (after escaping and wrapping).
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Matcher").field(&self.regex.as_str()).finish()
    }
}

/// Surround an already-escaped literal with the start/end boundary groups.
pub fn wrap_literal(escaped: &str) -> String {
    let mut out = String::with_capacity(REGEX_START_BOUNDARY.len() + escaped.len() + REGEX_END_BOUNDARY.len());
    out.push_str(REGEX_START_BOUNDARY);
    out.push_str(escaped);
    out.push_str(REGEX_END_BOUNDARY);
    out
}

/// Compile a phrase pattern.
///
/// Fails with [`CompileError::EmptyPattern`] for an empty pattern and with
/// [`CompileError::InvalidPattern`] when the effective expression does not
/// parse. Never panics.
pub fn compile(pattern: &str, is_regex: bool, is_case_sensitive: bool) -> Result<Matcher, CompileError> {
    if pattern.is_empty() {
        return Err(CompileError::EmptyPattern);
    }

    let effective = if is_regex { pattern.to_string() } else { wrap_literal(&regex::escape(pattern)) };

    let regex = RegexBuilder::new(&effective)
        .unicode(true)
        .case_insensitive(!is_case_sensitive)
        .build()
        .map_err(|source| CompileError::InvalidPattern { pattern: pattern.to_string(), source })?;

    Ok(Matcher { regex })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_literal_uses_exact_boundaries() {
        assert_eq!(wrap_literal("foo"), r"(\b|\s|^)foo(\b|\s|$)");
        assert_eq!(wrap_literal(""), r"(\b|\s|^)(\b|\s|$)");
    }

    #[test]
    fn literal_metacharacters_are_escaped() {
        let m = compile("a.b*(c)", false, true).unwrap();
        assert!(m.is_match("x a.b*(c) y"));
        assert!(!m.is_match("x axbbb(c) y"));
    }

    #[test]
    fn regex_mode_is_verbatim() {
        let m = compile(r"^!\w+", true, true).unwrap();
        assert_eq!(m.as_str(), r"^!\w+");
        assert!(m.is_match("!drop now"));
        assert!(!m.is_match("say !drop"));
    }

    #[test]
    fn invalid_regex_fails_cleanly() {
        for bad in ["f(oo", "a)", r"\p{Nope}", "[z-a]", "x{2,1}"] {
            match compile(bad, true, false) {
                Err(CompileError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, bad),
                other => panic!("expected InvalidPattern for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn large_counted_repetitions_compile() {
        for pattern in [r"\w{50}", r"\w{100}", r"(?:\w+\s){20}"] {
            let m = compile(pattern, true, false);
            assert!(m.is_ok(), "{pattern:?} should compile: {m:?}");
        }
        assert!(compile(r"\w{100}", true, false).unwrap().is_match(&"a".repeat(100)));
    }

    #[test]
    fn invalid_regex_text_is_fine_as_literal() {
        let m = compile("f(oo", false, false).unwrap();
        assert!(m.is_match("well f(oo then"));
    }

    #[test]
    fn empty_pattern_is_rejected_in_both_modes() {
        assert!(matches!(compile("", false, false), Err(CompileError::EmptyPattern)));
        assert!(matches!(compile("", true, true), Err(CompileError::EmptyPattern)));
    }

    #[test]
    fn case_insensitivity_folds_unicode() {
        let m = compile("straße", false, false).unwrap();
        assert!(m.is_match("STRAßE"));

        let m = compile("привет", false, false).unwrap();
        assert!(m.is_match("ПРИВЕТ всем"));

        let m = compile("Ärger", false, true).unwrap();
        assert!(!m.is_match("ärger"));
    }

    #[test]
    fn boundaries_respect_non_ascii_letters() {
        let m = compile("ber", false, false).unwrap();
        assert!(!m.is_match("überall"));
        assert!(m.is_match("ü ber"));
    }

    #[test]
    fn find_reports_span() {
        let m = compile("foo", false, false).unwrap();
        let span = m.find("hi foo").unwrap();
        assert_eq!(&"hi foo"[span.start..span.end].trim(), &"foo");
    }
}
