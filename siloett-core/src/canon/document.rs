//! Canon documents: the immutable source material facts are extracted from.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::episode::{EpisodeRef, LineRange};

/// Identifier of an ingested canon document (UUID v4).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The document set a request operates over (one fictional universe).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UniverseId(String);

impl UniverseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UniverseId {
    fn default() -> Self {
        Self("default".to_string())
    }
}

impl fmt::Display for UniverseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of canon document types.
///
/// Specificity drives retrieval tie-breaks: a character bible is more
/// authoritative about a character than a dialogue snippet from a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Script,
    CharacterBible,
    WorldBible,
    Timeline,
    Notes,
}

impl DocumentKind {
    /// Authority ranking: character-bible > world-bible > script > timeline > notes.
    pub fn specificity(self) -> u8 {
        match self {
            DocumentKind::CharacterBible => 4,
            DocumentKind::WorldBible => 3,
            DocumentKind::Script => 2,
            DocumentKind::Timeline => 1,
            DocumentKind::Notes => 0,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::Script => "script",
            DocumentKind::CharacterBible => "character-bible",
            DocumentKind::WorldBible => "world-bible",
            DocumentKind::Timeline => "timeline",
            DocumentKind::Notes => "notes",
        };
        f.write_str(name)
    }
}

/// Structured location fields identifying where in the source material
/// a document (or a fact within it) lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentLocator {
    pub episode: Option<EpisodeRef>,
    pub page: Option<u32>,
    pub lines: Option<LineRange>,
    pub section: Option<String>,
}

impl DocumentLocator {
    /// How precisely this locator pins down a location.
    /// Line ranges beat sections beat bare pages. Used as a fact
    /// precedence tie-break when validity scopes are equal.
    pub fn precision(&self) -> u8 {
        if self.lines.is_some() {
            3
        } else if self.section.is_some() {
            2
        } else if self.page.is_some() {
            1
        } else {
            0
        }
    }
}

/// Input to ingestion. Becomes a [`CanonDocument`] once accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDraft {
    pub title: String,
    pub kind: DocumentKind,
    pub universe: UniverseId,
    pub content: String,
    pub locator: DocumentLocator,
}

/// An ingested canon document. Immutable: superseding content is ingested
/// as a new version, never edited in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonDocument {
    pub id: DocumentId,
    pub title: String,
    pub kind: DocumentKind,
    pub universe: UniverseId,
    pub content: String,
    pub locator: DocumentLocator,
    /// blake3 hash of the raw content, for dedup on re-ingest.
    pub content_hash: String,
    pub ingested_at: DateTime<Utc>,
    /// Set when a newer version of this document has been ingested.
    pub superseded_by: Option<DocumentId>,
}

impl CanonDocument {
    pub fn compute_content_hash(content: &str) -> String {
        blake3::hash(content.as_bytes()).to_hex().to_string()
    }

    pub fn is_active(&self) -> bool {
        self.superseded_by.is_none()
    }
}
