//! Episode references and line ranges — the coordinate system of a canon.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SiloettError;

/// A season/episode coordinate, e.g. "2.8" (season 2, episode 8).
///
/// Total order: by season, then episode. Used for validity-scope
/// precedence and timeline checks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EpisodeRef {
    pub season: u16,
    pub episode: u16,
}

impl EpisodeRef {
    pub fn new(season: u16, episode: u16) -> Self {
        Self { season, episode }
    }
}

impl fmt::Display for EpisodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.season, self.episode)
    }
}

impl FromStr for EpisodeRef {
    type Err = SiloettError;

    /// Accepts "2.8", "S2E8", and "s2e8" forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parse = |a: &str, b: &str| -> Option<EpisodeRef> {
            Some(EpisodeRef::new(a.parse().ok()?, b.parse().ok()?))
        };

        let parsed = if let Some((season, episode)) = trimmed.split_once('.') {
            parse(season, episode)
        } else {
            let lower = trimmed.to_ascii_lowercase();
            lower
                .strip_prefix('s')
                .and_then(|rest| rest.split_once('e'))
                .and_then(|(season, episode)| parse(season, episode))
        };

        parsed.ok_or_else(|| SiloettError::InvalidEpisodeRef {
            input: trimmed.to_string(),
        })
    }
}

/// An inclusive line range inside a document, e.g. lines 45–47.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn single(line: u32) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.start >= 1 && self.end >= self.start
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl FromStr for LineRange {
    type Err = SiloettError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed.split_once('-') {
            Some((start, end)) => start
                .trim()
                .parse()
                .ok()
                .zip(end.trim().parse().ok())
                .map(|(start, end)| LineRange::new(start, end)),
            None => trimmed.parse().ok().map(LineRange::single),
        };
        parsed
            .filter(LineRange::is_valid)
            .ok_or_else(|| SiloettError::InvalidLineRange {
                input: trimmed.to_string(),
            })
    }
}
