//! Track token decomposition (`V`, `A2`, `B`, ...)

use crate::patterns;
use crate::types::{EdlError, Result};
use std::fmt;

/// A track token split into its kind and optional index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    /// Track kind code, e.g. `V` for video or `A` for audio
    pub kind: char,
    /// Numeric suffix, only present when the token carried one
    pub number: Option<u32>,
}

impl Track {
    /// Split a track token into kind and optional number
    pub fn parse(token: &str) -> Result<Self> {
        let caps = patterns::TRACK
            .captures(token)
            .ok_or_else(|| EdlError::MalformedInput(format!("invalid track token {token:?}")))?;

        let kind = caps[1]
            .chars()
            .next()
            .ok_or_else(|| EdlError::MalformedInput(format!("empty track token {token:?}")))?;
        let number = match caps.get(2) {
            Some(digits) => Some(digits.as_str().parse::<u32>().map_err(|_| {
                EdlError::MalformedInput(format!("track number out of range in {token:?}"))
            })?),
            None => None,
        };

        Ok(Self { kind, number })
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(n) => write!(f, "{}{}", self.kind, n),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_without_number() {
        let track = Track::parse("V").unwrap();
        assert_eq!(track.kind, 'V');
        assert_eq!(track.number, None);
    }

    #[test]
    fn test_track_with_number() {
        let track = Track::parse("A2").unwrap();
        assert_eq!(track.kind, 'A');
        assert_eq!(track.number, Some(2));
        assert_eq!(track.to_string(), "A2");

        assert_eq!(Track::parse("A12").unwrap().number, Some(12));
    }

    #[test]
    fn test_track_number_zero_is_kept() {
        assert_eq!(Track::parse("A0").unwrap().number, Some(0));
    }

    #[test]
    fn test_invalid_track() {
        assert!(Track::parse("").is_err());
        assert!(Track::parse("/V").is_err());
    }
}
