//! Fact extraction at ingestion: structured sections, script text, and
//! timeline entries become atomic [`CanonFact`]s.
//!
//! Extraction is pattern-driven. Every fact carries the verbatim source
//! line as its quote, so citations can always be re-verified against
//! the document content.

mod script;
mod sections;
mod timeline;

use chrono::Utc;
use regex::Regex;
use std::sync::LazyLock;

use siloett_core::canon::{
    CanonDocument, CanonFact, DocumentDraft, DocumentKind, EpisodeRef, Polarity, ValidityScope,
};
use siloett_core::errors::IngestError;

pub use script::extract_script_facts;
pub use sections::extract_section_facts;
pub use timeline::extract_timeline_facts;

pub(crate) use siloett_core::canon::subject::normalize_key;

/// Negated phrasing in a statement flips its polarity.
static NEGATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(no|not|never|none|stopped|stops|no longer|doesn't|does not|don't|don['’]t|won't|without|rarely)\b",
    )
    .expect("negation regex")
});

/// Inline scope tags: `[from 2.8]`, `[until 3.6]`.
static SCOPE_FROM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[from\s+([^\]]+)\]").expect("scope-from regex"));
static SCOPE_UNTIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[until\s+([^\]]+)\]").expect("scope-until regex"));

/// Bible shorthand prefixes: `Post-S2E8:` / `Pre-S2E8:`.
static POST_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Post-S(\d+)E(\d+):\s*").expect("post-prefix regex"));
static PRE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Pre-S(\d+)E(\d+):\s*").expect("pre-prefix regex"));

/// Locator fields each document kind must carry to be ingestible.
pub fn validate_draft(draft: &DocumentDraft) -> Result<(), IngestError> {
    if draft.content.trim().is_empty() {
        return Err(IngestError::EmptyContent);
    }

    let missing = |field: &'static str| IngestError::MissingField {
        kind: draft.kind,
        field,
    };

    match draft.kind {
        DocumentKind::Script => {
            if draft.locator.episode.is_none() {
                return Err(missing("episode"));
            }
            if draft.locator.page.is_none() {
                return Err(missing("page"));
            }
        }
        DocumentKind::CharacterBible | DocumentKind::WorldBible => {
            if draft.locator.page.is_none() {
                return Err(missing("page"));
            }
        }
        DocumentKind::Timeline | DocumentKind::Notes => {}
    }
    Ok(())
}

/// Extract all facts from an ingested document.
pub fn extract_facts(doc: &CanonDocument) -> Vec<CanonFact> {
    match doc.kind {
        DocumentKind::CharacterBible | DocumentKind::WorldBible | DocumentKind::Notes => {
            extract_section_facts(doc)
        }
        DocumentKind::Script => extract_script_facts(doc),
        DocumentKind::Timeline => extract_timeline_facts(doc),
    }
}

pub(crate) fn detect_polarity(statement: &str) -> Polarity {
    if NEGATION_RE.is_match(statement) {
        Polarity::Negates
    } else {
        Polarity::Affirms
    }
}

/// Parse and strip scope markers from a statement, returning the scope
/// and the cleaned statement text.
pub(crate) fn parse_scope(statement: &str) -> (ValidityScope, String) {
    let mut scope = ValidityScope::unscoped();
    let mut text = statement.to_string();

    if let Some(caps) = POST_PREFIX_RE.captures(&text) {
        scope.from = episode_from_caps(&caps);
        text = POST_PREFIX_RE.replace(&text, "").into_owned();
    } else if let Some(caps) = PRE_PREFIX_RE.captures(&text) {
        // "Pre-SxEy" holds up to the episode before y.
        scope.until = episode_from_caps(&caps).map(previous_episode);
        text = PRE_PREFIX_RE.replace(&text, "").into_owned();
    }

    if let Some(caps) = SCOPE_FROM_RE.captures(&text) {
        if let Ok(episode) = caps[1].trim().parse::<EpisodeRef>() {
            scope.from = Some(episode);
        }
        text = SCOPE_FROM_RE.replace(&text, "").into_owned();
    }
    if let Some(caps) = SCOPE_UNTIL_RE.captures(&text) {
        if let Ok(episode) = caps[1].trim().parse::<EpisodeRef>() {
            scope.until = Some(episode);
        }
        text = SCOPE_UNTIL_RE.replace(&text, "").into_owned();
    }

    (scope, text.trim().to_string())
}

fn episode_from_caps(caps: &regex::Captures<'_>) -> Option<EpisodeRef> {
    let season = caps[1].parse().ok()?;
    let episode = caps[2].parse().ok()?;
    Some(EpisodeRef::new(season, episode))
}

fn previous_episode(episode: EpisodeRef) -> EpisodeRef {
    if episode.episode > 1 {
        EpisodeRef::new(episode.season, episode.episode - 1)
    } else {
        EpisodeRef::new(episode.season.saturating_sub(1), u16::MAX)
    }
}

/// Shared constructor keeping all extraction paths consistent.
#[allow(clippy::too_many_arguments)]
pub(crate) fn build_fact(
    doc: &CanonDocument,
    subject: String,
    statement: String,
    quote: String,
    locator: siloett_core::canon::DocumentLocator,
    scope: ValidityScope,
    polarity: Polarity,
) -> CanonFact {
    CanonFact {
        id: siloett_core::canon::FactId::generate(),
        universe: doc.universe.clone(),
        subject,
        statement,
        quote,
        document_id: doc.id.clone(),
        document_title: doc.title.clone(),
        document_kind: doc.kind,
        locator,
        scope,
        polarity,
        extracted_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_detects_negation() {
        assert_eq!(
            detect_polarity("Fully mobile, no assistive devices required"),
            Polarity::Negates
        );
        assert_eq!(detect_polarity("Uses a wheelchair daily"), Polarity::Affirms);
    }

    #[test]
    fn parse_scope_handles_post_prefix() {
        let (scope, text) = parse_scope("Post-S2E8: Fully mobile");
        assert_eq!(scope.from, Some(EpisodeRef::new(2, 8)));
        assert_eq!(text, "Fully mobile");
    }

    #[test]
    fn parse_scope_handles_bracket_tags() {
        let (scope, text) = parse_scope("Uses a wheelchair [until 2.8]");
        assert_eq!(scope.until, Some(EpisodeRef::new(2, 8)));
        assert_eq!(text, "Uses a wheelchair");
    }
}
