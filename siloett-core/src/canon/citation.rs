//! Citations: the pointer from any statement back to its exact source.
//!
//! The wire shape is bit-exact across Search and Validate:
//! `{source, page?, lines?, section?, text}`.

use serde::{Deserialize, Serialize};

use super::document::DocumentId;

/// A resolved source reference with verbatim quoted text.
///
/// Invariant: every citation resolves to an existing document and a
/// location inside it. Citations are built by the Citation Tracker from
/// stored facts and are never fabricated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Document title, e.g. "Episode 2.8 Script".
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Line range rendered as "45-47".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Verbatim quote from the source document.
    pub text: String,
    /// Internal resolution handle; not part of the wire shape.
    #[serde(skip)]
    pub document_id: DocumentId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape_omits_empty_optionals_and_internal_id() {
        let citation = Citation {
            source: "Character Bible - Roy".to_string(),
            page: Some(3),
            lines: None,
            section: Some("Physical Status".to_string()),
            text: "Post-S2E8: Fully mobile, no assistive devices required".to_string(),
            document_id: DocumentId::generate(),
        };
        let json = serde_json::to_value(&citation).unwrap();
        assert_eq!(json["source"], "Character Bible - Roy");
        assert_eq!(json["page"], 3);
        assert!(json.get("lines").is_none());
        assert!(json.get("document_id").is_none());
    }
}
