//! Script segmentation into addressable, classified lines.

use regex::Regex;
use std::sync::LazyLock;

static SCENE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(INT|EXT)[./ ]").expect("scene regex"));
static SPEAKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Z][A-Z .']{1,30}):\s*(.*)$").expect("speaker regex"));

/// Classification of one physical script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    SceneHeading,
    /// Spoken line with its speaker in canonical form ("MOSS").
    Dialogue { speaker: String },
    Action,
    Blank,
}

/// One physical line of the submitted draft, 1-based.
#[derive(Debug, Clone)]
pub struct ScriptLine {
    pub number: u32,
    pub text: String,
    pub kind: LineKind,
}

impl ScriptLine {
    pub fn is_checkable(&self) -> bool {
        !matches!(self.kind, LineKind::Blank)
    }

    /// The spoken words for dialogue, the whole line otherwise.
    pub fn spoken_text(&self) -> &str {
        match &self.kind {
            LineKind::Dialogue { .. } => self
                .text
                .split_once(':')
                .map(|(_, rest)| rest.trim())
                .unwrap_or(&self.text),
            _ => &self.text,
        }
    }
}

/// Split a draft into classified lines. Line numbers match the raw
/// input exactly, so issues point where the writer is looking.
pub fn segment(script: &str) -> Vec<ScriptLine> {
    script
        .lines()
        .enumerate()
        .map(|(index, raw)| {
            let text = raw.trim_end().to_string();
            let kind = classify(&text);
            ScriptLine {
                number: (index + 1) as u32,
                text,
                kind,
            }
        })
        .collect()
}

fn classify(line: &str) -> LineKind {
    if line.trim().is_empty() {
        LineKind::Blank
    } else if SCENE_RE.is_match(line) {
        LineKind::SceneHeading
    } else if let Some(caps) = SPEAKER_RE.captures(line) {
        LineKind::Dialogue {
            speaker: caps[1].trim().to_string(),
        }
    } else {
        LineKind::Action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_the_basic_shapes() {
        let lines = segment("INT. BASEMENT OFFICE - DAY\n\nMOSS: Hello, IT.\nRoy hangs up.\n");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].kind, LineKind::SceneHeading);
        assert_eq!(lines[1].kind, LineKind::Blank);
        assert_eq!(
            lines[2].kind,
            LineKind::Dialogue {
                speaker: "MOSS".to_string()
            }
        );
        assert_eq!(lines[3].kind, LineKind::Action);
    }

    #[test]
    fn line_numbers_are_one_based_and_stable() {
        let lines = segment("a\n\nb");
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[2].number, 3);
    }

    #[test]
    fn spoken_text_strips_the_speaker() {
        let lines = segment("MOSS: That would be an ecumenical matter.");
        assert_eq!(lines[0].spoken_text(), "That would be an ecumenical matter.");
    }
}
