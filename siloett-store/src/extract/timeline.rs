//! Extraction from timeline documents: one fact per dated entry.
//!
//! Expected shape, one entry per line:
//!
//! ```text
//! - 2.8: Roy injured, uses a wheelchair for the episode
//! - 3.6: Roy fully recovered, back on his feet
//! ```

use regex::Regex;
use std::sync::LazyLock;

use siloett_core::canon::{
    CanonDocument, CanonFact, DocumentLocator, EpisodeRef, LineRange, ValidityScope,
};

use super::{build_fact, detect_polarity};

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\s*((?:\d+\.\d+)|(?:[Ss]\d+[Ee]\d+))\s*:\s*(.+)$").expect("entry regex")
});

pub fn extract_timeline_facts(doc: &CanonDocument) -> Vec<CanonFact> {
    let mut facts = Vec::new();

    for (index, raw) in doc.content.lines().enumerate() {
        let line = raw.trim();
        let Some(caps) = ENTRY_RE.captures(line) else {
            continue;
        };
        let Ok(episode) = caps[1].parse::<EpisodeRef>() else {
            continue;
        };
        let statement = caps[2].trim().to_string();
        if statement.is_empty() {
            continue;
        }

        let locator = DocumentLocator {
            episode: Some(episode),
            page: doc.locator.page,
            lines: Some(LineRange::single((index + 1) as u32)),
            section: None,
        };
        facts.push(build_fact(
            doc,
            format!("timeline/s{}e{}", episode.season, episode.episode),
            statement,
            line.to_string(),
            locator,
            ValidityScope::from_episode(episode),
            detect_polarity(line),
        ));
    }
    facts
}
