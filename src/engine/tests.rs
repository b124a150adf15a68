use crate::engine::{RuleSet, evaluate, resolve};
use crate::{Color, MessageFlags, PhraseFlags, PhraseRule, ResolveOptions, Sound};

fn literal(pattern: &str) -> PhraseRule {
    phrase! { id: "lit", pattern: pattern }
}

fn matches(rule: &PhraseRule, subject: &str) -> bool {
    evaluate(std::slice::from_ref(rule), subject).contains(rule.id())
}

#[test]
fn literal_boundary_examples() {
    // (pattern, subject, expected)
    let cases: Vec<(&str, &str, bool)> = vec![
        ("foo", "Hello foo bar", true),
        ("foo", "barfoobar", false),
        ("foo", "FOO!", true),
        ("foo", "foo", true),
        ("foo", "foo at the start", true),
        ("foo", "at the end foo", true),
        ("foo", "foobar", false),
        ("foo", "barfoo", false),
        ("foo", "(foo)", true),
        ("foo", "a\tfoo\tb", true),
        ("foo", "@foo", true),
        ("foo bar", "say foo bar now", true),
        ("foo bar", "say foo  bar now", false),
        ("c++", "i like c++ a lot", true),
        ("c++", "i like c++", true),
        (":)", "hello :) there", true),
        ("1.5", "version 105 here", false),
        ("1.5", "version 1.5 here", true),
        ("über", "Ich bin ÜBER dir", true),
        ("über", "darüber", false),
        ("ber", "über", false),
    ];

    for (pattern, subject, expected) in cases {
        assert_eq!(matches(&literal(pattern), subject), expected, "pattern={pattern:?} subject={subject:?}");
    }
}

#[test]
fn case_insensitive_matching_covers_non_ascii() {
    let cases: Vec<(&str, &str)> = vec![
        ("foo", "FoO"),
        ("éclair", "ÉCLAIR"),
        ("ΣΟΦΙΑ", "σοφια"),
        ("groß", "GROß"),
        ("ärger", "ÄRGER"),
        ("мир", "МИР"),
    ];

    for (pattern, subject) in cases {
        let rule = literal(pattern);
        assert!(matches(&rule, subject), "pattern={pattern:?} subject={subject:?}");

        let sensitive = rule.with_flags(rule.flags() | PhraseFlags::CASE_SENSITIVE);
        assert!(!matches(&sensitive, subject), "case-sensitive pattern={pattern:?} subject={subject:?}");
    }
}

#[test]
fn empty_patterns_never_match() {
    for flags in [PhraseFlags::default(), PhraseFlags::all(), PhraseFlags::ENABLED | PhraseFlags::REGEX] {
        let rule = PhraseRule::new("empty", "", flags, "", None);
        assert!(!rule.is_valid());
        for subject in ["", " ", "anything"] {
            assert!(!matches(&rule, subject));
        }
    }
}

#[test]
fn invalid_regex_behaves_like_absent_rule() {
    let bad = phrase! { id: "bad", pattern: "f(oo", sound: true, regex: true, color: Color::rgb(255, 0, 0) };
    let good = vec![
        phrase! { id: "a", pattern: "foo", mentions: true },
        phrase! { id: "b", pattern: "f\\(oo", alert: true, regex: true },
    ];
    let mut with_bad = good.clone();
    with_bad.insert(1, bad);

    let opts = ResolveOptions::default();
    for subject in ["f(oo", "foo", "nothing", "foo f(oo"] {
        let a = evaluate(&good, subject);
        let b = evaluate(&with_bad, subject);
        assert_eq!(a.ids().collect::<Vec<_>>(), b.ids().collect::<Vec<_>>(), "subject={subject:?}");
        assert_eq!(
            resolve(&a, MessageFlags::empty(), &opts),
            resolve(&b, MessageFlags::empty(), &opts),
            "subject={subject:?}"
        );
    }
}

#[test]
fn scenario_a_literal_phrase() {
    let rule = phrase! { id: "a", pattern: "foo" };
    assert!(!rule.is_regex() && !rule.is_case_sensitive());

    assert!(matches(&rule, "Hello foo bar"));
    assert!(!matches(&rule, "barfoobar"));
    assert!(matches(&rule, "FOO!"));
}

#[test]
fn scenario_b_invalid_regex() {
    let rule = phrase! { id: "b", pattern: "f(oo", regex: true };
    assert!(!rule.is_valid());
    assert!(rule.compile_error().is_some());

    let rules = vec![rule];
    assert!(evaluate(&rules, "f(oo").is_empty());
    assert!(RuleSet::new(rules).evaluate("f(oo").is_empty());
}

#[test]
fn scenario_c_custom_sound_tie_break() {
    // Iteration order: default-sound phrase first, custom-sound phrase second.
    let rules = vec![
        phrase! { id: "default", pattern: "ping", sound: true },
        phrase! { id: "custom", pattern: "ping", sound: true, sound_url: "custom.wav" },
    ];
    let out = resolve(&evaluate(&rules, "ping"), MessageFlags::empty(), &ResolveOptions::default());
    assert!(out.play_sound);
    // The earliest phrase that specifies a non-default URL wins.
    assert_eq!(out.sound, Sound::Custom("custom.wav".to_string()));

    // Two custom URLs: the earlier one wins.
    let rules = vec![
        phrase! { id: "first", pattern: "ping", sound: true, sound_url: "first.wav" },
        phrase! { id: "second", pattern: "ping", sound: true, sound_url: "second.wav" },
    ];
    let out = resolve(&evaluate(&rules, "ping"), MessageFlags::empty(), &ResolveOptions::default());
    assert_eq!(out.sound, Sound::Custom("first.wav".to_string()));
}

#[test]
fn disabling_removes_contribution_without_recompiling() {
    let rule = phrase! { id: "d", pattern: "hello", mentions: true };
    let snapshot = RuleSet::new(vec![rule.clone()]);
    assert!(snapshot.evaluate("hello there").contains("d"));

    let disabled = rule.with_enabled(false);
    // Same compiled program, carried over rather than rebuilt.
    assert_eq!(disabled.matcher().map(|m| m.as_str()), rule.matcher().map(|m| m.as_str()));

    let next = snapshot.with_rule(disabled);
    assert!(next.evaluate("hello there").is_empty());
    assert!(snapshot.evaluate("hello there").contains("d"));
}

#[test]
fn evaluation_is_deterministic() {
    let rules = vec![
        phrase! { id: "x", pattern: "a+", regex: true },
        phrase! { id: "y", pattern: "b" },
        phrase! { id: "z", pattern: "A", case_sensitive: true },
    ];
    let set = RuleSet::new(rules);
    let first: Vec<&str> = set.evaluate("aaa b A").ids().collect();
    for _ in 0..100 {
        assert_eq!(set.evaluate("aaa b A").ids().collect::<Vec<_>>(), first);
    }
    assert_eq!(first, vec!["x", "y", "z"]);
}
