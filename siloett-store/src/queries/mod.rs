//! SQL query modules and shared row/column codecs.

pub mod document_ops;
pub mod fact_ops;
pub mod fact_search;

use siloett_core::canon::{DocumentKind, EpisodeRef, Polarity};
use siloett_core::errors::{SiloettError, SiloettResult};

use crate::to_store_err;

pub(crate) fn kind_to_column(kind: DocumentKind) -> String {
    kind.to_string()
}

pub(crate) fn kind_from_column(raw: &str) -> SiloettResult<DocumentKind> {
    match raw {
        "script" => Ok(DocumentKind::Script),
        "character-bible" => Ok(DocumentKind::CharacterBible),
        "world-bible" => Ok(DocumentKind::WorldBible),
        "timeline" => Ok(DocumentKind::Timeline),
        "notes" => Ok(DocumentKind::Notes),
        other => Err(to_store_err(format!("unknown document kind '{other}'"))),
    }
}

pub(crate) fn polarity_to_column(polarity: Polarity) -> &'static str {
    match polarity {
        Polarity::Affirms => "affirms",
        Polarity::Negates => "negates",
    }
}

pub(crate) fn polarity_from_column(raw: &str) -> SiloettResult<Polarity> {
    match raw {
        "affirms" => Ok(Polarity::Affirms),
        "negates" => Ok(Polarity::Negates),
        other => Err(to_store_err(format!("unknown polarity '{other}'"))),
    }
}

pub(crate) fn episode_to_column(episode: Option<EpisodeRef>) -> Option<String> {
    episode.map(|e| e.to_string())
}

pub(crate) fn episode_from_column(raw: Option<String>) -> SiloettResult<Option<EpisodeRef>> {
    raw.map(|s| s.parse::<EpisodeRef>())
        .transpose()
        .map_err(|e: SiloettError| to_store_err(e.to_string()))
}

/// Serialize an embedding as little-endian f32 bytes.
pub(crate) fn embedding_to_blob(embedding: &[f32]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(embedding.len() * 4);
    for value in embedding {
        blob.extend_from_slice(&value.to_le_bytes());
    }
    blob
}

pub(crate) fn embedding_from_blob(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}
