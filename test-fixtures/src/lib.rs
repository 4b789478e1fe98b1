//! Shared test fixtures: a small IT Crowd canon and draft scripts with
//! known-good and known-bad content.
//!
//! The canon is built so the interesting precedence cases exist:
//! Roy's wheelchair arc has an unscoped-until bible entry, a post-2.8
//! bible entry, and a line-addressed script fact, all about
//! `roy/physical_status`.

use siloett_core::canon::{
    DocumentDraft, DocumentId, DocumentKind, DocumentLocator, EpisodeRef, LineRange, UniverseId,
};
use siloett_core::errors::IngestError;
use siloett_core::traits::ICanonStore;

/// Universe all fixtures live in.
pub fn universe() -> UniverseId {
    UniverseId::new("it-crowd")
}

/// Line numbers of the planted problems in [`draft_script_with_issues`].
pub const WHEELCHAIR_LINE: u32 = 45;
pub const TIMELINE_LINE: u32 = 78;
pub const WORLD_RULE_LINE: u32 = 112;
pub const VOICE_LINE: u32 = 156;

/// Episode context the draft scripts are written for.
pub fn draft_episode() -> EpisodeRef {
    EpisodeRef::new(3, 2)
}

/// Line in [`episode_2_8_script`] carrying the wheelchair fact.
pub const CANON_SCRIPT_FACT_LINE: u32 = 3;

pub fn episode_2_8_script() -> DocumentDraft {
    let content = "\
INT. BASEMENT OFFICE - DAY

Roy stands up and pushes the wheelchair away. He doesn't need it anymore.

MOSS: You're walking!

ROY: Good as new. The leg healed weeks ago.
";
    DocumentDraft {
        title: "Episode 2.8 Script".to_string(),
        kind: DocumentKind::Script,
        universe: universe(),
        content: content.to_string(),
        locator: DocumentLocator {
            episode: Some(EpisodeRef::new(2, 8)),
            page: Some(1),
            lines: Some(LineRange::new(1, 7)),
            section: None,
        },
    }
}

pub fn character_bible_roy() -> DocumentDraft {
    let content = "\
## Physical Status
Uses a wheelchair while his leg heals [until 2.7]
Post-S2E8: Fully mobile, no assistive devices required

## Speech Patterns
Sarcastic, answers the phone with a rehearsed support script

## Core Traits
Work-shy but fundamentally loyal to the basement
";
    DocumentDraft {
        title: "Character Bible - Roy".to_string(),
        kind: DocumentKind::CharacterBible,
        universe: universe(),
        content: content.to_string(),
        locator: DocumentLocator {
            page: Some(12),
            ..Default::default()
        },
    }
}

pub fn character_bible_moss() -> DocumentDraft {
    let content = "\
## Speech Patterns
Formal and precise, never uses slang

## Core Traits
Encyclopedic and literal-minded
";
    DocumentDraft {
        title: "Character Bible - Moss".to_string(),
        kind: DocumentKind::CharacterBible,
        universe: universe(),
        content: content.to_string(),
        locator: DocumentLocator {
            page: Some(31),
            ..Default::default()
        },
    }
}

pub fn world_bible() -> DocumentDraft {
    let content = "\
## Locations
- The Internet: A small black box with a single red light, kept at the top of Big Ben
- Reynholm Industries: A London tower block housing the basement IT department
";
    DocumentDraft {
        title: "World Bible".to_string(),
        kind: DocumentKind::WorldBible,
        universe: universe(),
        content: content.to_string(),
        locator: DocumentLocator {
            page: Some(3),
            ..Default::default()
        },
    }
}

pub fn timeline_doc() -> DocumentDraft {
    let content = "\
- 1.4: Roy breaks his leg and starts using a wheelchair
- 2.8: Roy recovers and walks again
- 3.6: Moss wins the grand final of Countdown
";
    DocumentDraft {
        title: "Series Timeline".to_string(),
        kind: DocumentKind::Timeline,
        universe: universe(),
        content: content.to_string(),
        locator: DocumentLocator::default(),
    }
}

/// Ingest the whole fixture canon. Returns the document ids in
/// ingestion order.
pub fn seed_canon(store: &dyn ICanonStore) -> Result<Vec<DocumentId>, IngestError> {
    let drafts = [
        episode_2_8_script(),
        character_bible_roy(),
        character_bible_moss(),
        world_bible(),
        timeline_doc(),
    ];
    let mut ids = Vec::with_capacity(drafts.len());
    for draft in &drafts {
        ids.push(store.ingest(draft)?);
    }
    Ok(ids)
}

/// A draft script (for episode 3.2) with one planted problem per
/// validation category, at the `*_LINE` constants above.
pub fn draft_script_with_issues() -> String {
    let mut lines = filler_lines(160);
    lines[(WHEELCHAIR_LINE - 1) as usize] =
        "Roy rolls through the door in his wheelchair, waving.".to_string();
    lines[(TIMELINE_LINE - 1) as usize] =
        "MOSS: People recognise me from the grand final of Countdown now.".to_string();
    lines[(WORLD_RULE_LINE - 1) as usize] =
        "DENHOLM: The Internet is not a black box, it fills three warehouses.".to_string();
    lines[(VOICE_LINE - 1) as usize] =
        "MOSS: That database is well wicked, innit, dude?".to_string();
    lines.join("\n")
}

/// A draft whose only problem is the wheelchair line.
pub fn wheelchair_only_draft() -> String {
    let mut lines = filler_lines(60);
    lines[(WHEELCHAIR_LINE - 1) as usize] =
        "Roy rolls through the door in his wheelchair, waving.".to_string();
    lines.join("\n")
}

/// A draft with no planted problems at all.
pub fn clean_script() -> String {
    filler_lines(60).join("\n")
}

/// Harmless screenplay filler: no assistive devices, no world subjects,
/// no slang, no episode events.
fn filler_lines(count: usize) -> Vec<String> {
    const BLOCK: [&str; 8] = [
        "INT. BASEMENT OFFICE - DAY",
        "",
        "JEN: Morning, everyone.",
        "",
        "ROY: Morning.",
        "",
        "Moss types at his keyboard.",
        "",
    ];
    (0..count)
        .map(|i| BLOCK[i % BLOCK.len()].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planted_lines_sit_where_promised() {
        let draft = draft_script_with_issues();
        let lines: Vec<&str> = draft.lines().collect();
        assert!(lines[(WHEELCHAIR_LINE - 1) as usize].contains("wheelchair"));
        assert!(lines[(TIMELINE_LINE - 1) as usize].contains("Countdown"));
        assert!(lines[(WORLD_RULE_LINE - 1) as usize].contains("Internet"));
        assert!(lines[(VOICE_LINE - 1) as usize].starts_with("MOSS:"));
    }

    #[test]
    fn filler_carries_no_trigger_words() {
        for line in clean_script().lines() {
            let lower = line.to_lowercase();
            assert!(!lower.contains("wheelchair"));
            assert!(!lower.contains("internet"));
            assert!(!lower.contains("countdown"));
            assert!(!lower.contains("innit"));
        }
    }
}
