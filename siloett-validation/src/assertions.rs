//! Lexical assertion analysis shared by the category checks.
//!
//! Mirrors the patterns ingestion extraction uses, so a draft line and
//! the canon fact it contradicts are judged by the same rules.

use regex::Regex;
use std::sync::LazyLock;

use siloett_core::canon::Polarity;

static NEGATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(no|not|never|none|stopped|stops|no longer|doesn't|does not|don't|don['’]t|won't|without|rarely)\b",
    )
    .expect("negation regex")
});

static DEVICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(wheelchair|crutch(?:es)?|cane|walking stick|cast|sling)\b")
        .expect("device regex")
});

static SLANG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(innit|dude|bro|gonna|wanna|ain't|wicked|totes)\b").expect("slang regex")
});

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][a-z]{2,}|[A-Z]{3,})\b").expect("name regex"));

const NAME_STOPLIST: &[&str] = &[
    "INT", "EXT", "CUT", "FADE", "SCENE", "The", "She", "His", "Her", "They",
];

pub fn polarity_of(text: &str) -> Polarity {
    if NEGATION_RE.is_match(text) {
        Polarity::Negates
    } else {
        Polarity::Affirms
    }
}

pub fn mentions_device(text: &str) -> bool {
    DEVICE_RE.is_match(text)
}

pub fn has_slang(text: &str) -> bool {
    SLANG_RE.is_match(text)
}

/// First plausible character name in a line (stage-direction case).
pub fn character_in(text: &str) -> Option<String> {
    NAME_RE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .find(|name| !NAME_STOPLIST.contains(&name.as_str()))
}

/// Lowercase content tokens of length >= 4, used for event matching.
pub fn content_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|s| s.len() >= 4)
        .map(|s| s.to_lowercase())
        .collect()
}

/// Number of shared content tokens between two texts.
pub fn token_overlap(a: &str, b: &str) -> usize {
    let b_tokens = content_tokens(b);
    content_tokens(a)
        .iter()
        .filter(|token| b_tokens.contains(token))
        .count()
}
