//! Extraction from sectioned documents (character bibles, world bibles,
//! free-form notes).
//!
//! Expected shape:
//!
//! ```text
//! ## Physical Status
//! Post-S2E8: Fully mobile, no assistive devices required
//!
//! ## Locations
//! - The Internet: A small black box with a red light on top
//! ```
//!
//! Each statement line under a heading becomes one fact. The heading
//! becomes the section locator, so bible facts sit one precision level
//! below line-addressed script facts.

use regex::Regex;
use std::sync::LazyLock;

use siloett_core::canon::{CanonDocument, CanonFact, DocumentKind, DocumentLocator};

use super::{build_fact, detect_polarity, normalize_key, parse_scope};

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,4}\s+(.+)$").expect("heading regex"));

/// `- Name: statement` entries inside world-bible sections.
static NAMED_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\s*([^:]{1,60}):\s*(.+)$").expect("named-entry regex"));

pub fn extract_section_facts(doc: &CanonDocument) -> Vec<CanonFact> {
    let prefix = subject_prefix(doc);
    let mut facts = Vec::new();
    let mut section: Option<String> = None;

    for raw in doc.content.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(caps) = HEADING_RE.captures(line) {
            section = Some(caps[1].trim().to_string());
            continue;
        }
        let Some(section_name) = &section else {
            continue;
        };

        let (subject, body) = match (doc.kind, NAMED_ENTRY_RE.captures(line)) {
            (DocumentKind::WorldBible, Some(caps)) => (
                format!("{prefix}/{}", normalize_key(&caps[1])),
                caps[2].trim().to_string(),
            ),
            _ => (
                format!("{prefix}/{}", normalize_key(section_name)),
                line.trim_start_matches('-').trim().to_string(),
            ),
        };

        let (scope, statement) = parse_scope(&body);
        if statement.is_empty() {
            continue;
        }
        let polarity = detect_polarity(&statement);
        let locator = DocumentLocator {
            episode: doc.locator.episode,
            page: doc.locator.page,
            lines: None,
            section: Some(section_name.clone()),
        };
        facts.push(build_fact(
            doc,
            subject,
            statement,
            line.to_string(),
            locator,
            scope,
            polarity,
        ));
    }
    facts
}

/// Character bibles key facts by character name taken from the title
/// ("Character Bible - Roy" -> "roy"); world bibles use "world", notes
/// use "notes".
fn subject_prefix(doc: &CanonDocument) -> String {
    match doc.kind {
        DocumentKind::CharacterBible => doc
            .title
            .rsplit_once('-')
            .map(|(_, name)| normalize_key(name))
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| normalize_key(&doc.title)),
        DocumentKind::WorldBible => "world".to_string(),
        _ => "notes".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use siloett_core::canon::{DocumentId, EpisodeRef, Polarity, UniverseId};

    fn bible(title: &str, kind: DocumentKind, content: &str) -> CanonDocument {
        CanonDocument {
            id: DocumentId::generate(),
            title: title.to_string(),
            kind,
            universe: UniverseId::default(),
            content: content.to_string(),
            locator: DocumentLocator {
                page: Some(12),
                ..Default::default()
            },
            content_hash: CanonDocument::compute_content_hash(content),
            ingested_at: Utc::now(),
            superseded_by: None,
        }
    }

    #[test]
    fn character_bible_sections_become_scoped_facts() {
        let doc = bible(
            "Character Bible - Roy",
            DocumentKind::CharacterBible,
            "## Physical Status\nPost-S2E8: Fully mobile, no assistive devices required\n",
        );
        let facts = extract_section_facts(&doc);
        assert_eq!(facts.len(), 1);
        let fact = &facts[0];
        assert_eq!(fact.subject, "roy/physical_status");
        assert_eq!(fact.scope.from, Some(EpisodeRef::new(2, 8)));
        assert_eq!(fact.polarity, Polarity::Negates);
        assert_eq!(fact.locator.section.as_deref(), Some("Physical Status"));
        assert_eq!(fact.locator.precision(), 2);
        assert!(doc.content.contains(&fact.quote));
    }

    #[test]
    fn world_bible_named_entries_get_their_own_subjects() {
        let doc = bible(
            "World Bible",
            DocumentKind::WorldBible,
            "## Locations\n- The Internet: A small black box with a red light on top\n",
        );
        let facts = extract_section_facts(&doc);
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].subject, "world/the_internet");
        assert!(facts[0].statement.starts_with("A small black box"));
    }

    #[test]
    fn lines_before_any_heading_are_ignored() {
        let doc = bible(
            "Character Bible - Moss",
            DocumentKind::CharacterBible,
            "preamble text\n## Core Traits\nSocially awkward genius\n",
        );
        let facts = extract_section_facts(&doc);
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].subject, "moss/core_traits");
    }
}
