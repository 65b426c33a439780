//! Frame-accurate timecode values
//!
//! Only what an event record needs: parse from text or a frame count, count
//! frames, and render back to the canonical `HH:MM:SS:FF` form.

use crate::patterns;
use crate::types::{EdlError, FrameRate, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A timecode tied to a frame rate
///
/// Frame values are not range-checked against the rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timecode {
    hours: u32,
    minutes: u32,
    seconds: u32,
    frames: u32,
    frame_rate: FrameRate,
    drop_frame: bool,
}

impl Timecode {
    /// Parse `HH:MM:SS:FF`. A `;` or `.` before the frames marks drop-frame.
    pub fn parse(text: &str, frame_rate: impl Into<FrameRate>) -> Result<Self> {
        let text = text.trim();
        let caps = patterns::TIMECODE
            .captures(text)
            .ok_or_else(|| EdlError::InvalidTimecode(text.to_string()))?;

        let field = |i: usize| -> Result<u32> {
            caps[i]
                .parse::<u32>()
                .map_err(|_| EdlError::InvalidTimecode(text.to_string()))
        };

        Ok(Self {
            hours: field(1)?,
            minutes: field(2)?,
            seconds: field(3)?,
            frames: field(5)?,
            frame_rate: frame_rate.into(),
            drop_frame: &caps[4] != ":",
        })
    }

    /// Build a timecode from an absolute frame count
    ///
    /// NTSC fractional rates (29.97, 59.94) count in drop-frame. Counts whose
    /// hour field cannot be represented fail with [`EdlError::InvalidTimecode`].
    pub fn from_frames(count: u64, frame_rate: impl Into<FrameRate>) -> Result<Self> {
        let frame_rate = frame_rate.into();
        let fps = frame_rate.nominal();
        let drop_frame = frame_rate.is_ntsc_drop();
        let overflow = || EdlError::InvalidTimecode(format!("{count} frames at {frame_rate} fps"));

        let mut n = count;
        if drop_frame {
            let dropped = drop_per_minute(fps);
            let per_ten_minutes = fps * 600 - dropped * 9;
            let per_minute = fps * 60 - dropped;
            let tens = n / per_ten_minutes;
            let rest = n % per_ten_minutes;
            let mut skipped = dropped * 9 * tens;
            if rest > dropped {
                skipped += dropped * ((rest - dropped) / per_minute);
            }
            n = n.checked_add(skipped).ok_or_else(overflow)?;
        }

        let hours = u32::try_from(n / (fps * 3600)).map_err(|_| overflow())?;
        Ok(Self {
            hours,
            minutes: ((n / (fps * 60)) % 60) as u32,
            seconds: ((n / fps) % 60) as u32,
            frames: (n % fps) as u32,
            frame_rate,
            drop_frame,
        })
    }

    /// Absolute frame count from `00:00:00:00`
    pub fn frame_count(&self) -> u64 {
        let fps = self.frame_rate.nominal();
        let (h, m, s, f) = (
            self.hours as u64,
            self.minutes as u64,
            self.seconds as u64,
            self.frames as u64,
        );
        let nominal = ((h * 3600 + m * 60 + s) * fps) + f;

        if !self.drop_frame {
            return nominal;
        }
        let total_minutes = h * 60 + m;
        let skipped = drop_per_minute(fps) * (total_minutes - total_minutes / 10);
        nominal.saturating_sub(skipped)
    }

    pub fn frame_rate(&self) -> FrameRate {
        self.frame_rate
    }

    pub fn is_drop_frame(&self) -> bool {
        self.drop_frame
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }
}

/// Frame numbers skipped at the start of each non-tenth minute
fn drop_per_minute(nominal_fps: u64) -> u64 {
    nominal_fps / 15
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.drop_frame { ';' } else { ':' };
        write!(
            f,
            "{:02}:{:02}:{:02}{}{:02}",
            self.hours, self.minutes, self.seconds, sep, self.frames
        )
    }
}

impl Serialize for Timecode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A timecode slot in a plain record, before normalization
///
/// Records read from JSON carry text or a frame count. Hand-built records
/// may already hold a [`Timecode`], which normalization leaves untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum TimecodeSource {
    Timecode(Timecode),
    Text(String),
    Frames(u64),
}

impl TimecodeSource {
    /// Convert to a [`Timecode`] at `frame_rate` unless already typed
    pub fn into_timecode(self, frame_rate: impl Into<FrameRate>) -> Result<Timecode> {
        match self {
            TimecodeSource::Timecode(tc) => Ok(tc),
            TimecodeSource::Text(text) => Timecode::parse(&text, frame_rate),
            TimecodeSource::Frames(count) => Timecode::from_frames(count, frame_rate),
        }
    }

    /// Empty text counts as no timecode at all
    pub fn is_blank(&self) -> bool {
        matches!(self, TimecodeSource::Text(text) if text.trim().is_empty())
    }
}

impl From<Timecode> for TimecodeSource {
    fn from(tc: Timecode) -> Self {
        TimecodeSource::Timecode(tc)
    }
}

impl From<&str> for TimecodeSource {
    fn from(text: &str) -> Self {
        TimecodeSource::Text(text.to_string())
    }
}

impl From<String> for TimecodeSource {
    fn from(text: String) -> Self {
        TimecodeSource::Text(text)
    }
}

impl From<u64> for TimecodeSource {
    fn from(count: u64) -> Self {
        TimecodeSource::Frames(count)
    }
}

impl<'de> Deserialize<'de> for TimecodeSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Frames(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => TimecodeSource::Text(text),
            Raw::Frames(count) => TimecodeSource::Frames(count),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let tc = Timecode::parse("01:02:03:04", 25.0).unwrap();
        assert_eq!(tc.hours(), 1);
        assert_eq!(tc.minutes(), 2);
        assert_eq!(tc.seconds(), 3);
        assert_eq!(tc.frames(), 4);
        assert!(!tc.is_drop_frame());
        assert_eq!(tc.to_string(), "01:02:03:04");
    }

    #[test]
    fn test_drop_frame_separator() {
        let tc = Timecode::parse("00:59:58;00", 29.97).unwrap();
        assert!(tc.is_drop_frame());
        assert_eq!(tc.to_string(), "00:59:58;00");

        let dotted = Timecode::parse("00:00:01.15", 29.97).unwrap();
        assert!(dotted.is_drop_frame());
        assert_eq!(dotted.to_string(), "00:00:01;15");
    }

    #[test]
    fn test_invalid_timecode() {
        assert!(matches!(
            Timecode::parse("1:00:00:00", 25.0),
            Err(EdlError::InvalidTimecode(_))
        ));
        assert!(Timecode::parse("not a timecode", 25.0).is_err());
        assert!(Timecode::parse("", 25.0).is_err());
    }

    #[test]
    fn test_frame_count_non_drop() {
        let tc = Timecode::parse("01:00:00:00", 25.0).unwrap();
        assert_eq!(tc.frame_count(), 90_000);
        assert_eq!(Timecode::from_frames(90_000, 25.0).unwrap(), tc);
    }

    #[test]
    fn test_frame_count_drop_frame() {
        // First frame after the skipped :00 and :01 of minute one
        let tc = Timecode::parse("00:01:00;02", 29.97).unwrap();
        assert_eq!(tc.frame_count(), 1800);
        assert_eq!(Timecode::from_frames(1800, 29.97).unwrap().to_string(), "00:01:00;02");

        // Tenth minutes keep all frames
        let ten = Timecode::parse("00:10:00;00", 29.97).unwrap();
        assert_eq!(ten.frame_count(), 17_982);
        assert_eq!(Timecode::from_frames(17_982, 29.97).unwrap().to_string(), "00:10:00;00");

        let hour = Timecode::parse("01:00:00;00", 29.97).unwrap();
        assert_eq!(hour.frame_count(), 107_892);
        assert_eq!(Timecode::from_frames(107_892, 29.97).unwrap(), hour);
    }

    #[test]
    fn test_from_frames_past_99_hours() {
        let tc = Timecode::from_frames(9_000_000, 25.0).unwrap();
        assert_eq!(tc.hours(), 100);
        assert_eq!(tc.to_string(), "100:00:00:00");

        let reparsed = Timecode::parse(&tc.to_string(), 25.0).unwrap();
        assert_eq!(reparsed, tc);
        assert_eq!(reparsed.frame_count(), 9_000_000);
    }

    #[test]
    fn test_from_frames_overflow_is_an_error() {
        assert!(matches!(
            Timecode::from_frames(u64::MAX, 29.97),
            Err(EdlError::InvalidTimecode(_))
        ));
        assert!(matches!(
            Timecode::from_frames(u64::MAX, 25.0),
            Err(EdlError::InvalidTimecode(_))
        ));
        // Out-of-range rates fall back to 29.97 instead of saturating
        let tc = Timecode::from_frames(10, 1e300).unwrap();
        assert_eq!(tc.frame_rate().as_f64(), 29.97);
        assert_eq!(tc.to_string(), "00:00:00;10");
    }

    #[test]
    fn test_parse_oversized_hours() {
        assert!(matches!(
            Timecode::parse("99999999999:00:00:00", 25.0),
            Err(EdlError::InvalidTimecode(_))
        ));
    }

    #[test]
    fn test_timecode_source_resolution() {
        let typed = Timecode::parse("01:00:00:00", 24.0).unwrap();
        // Already typed: the rate passed in is ignored
        assert_eq!(TimecodeSource::from(typed).into_timecode(25.0).unwrap(), typed);

        let text = TimecodeSource::from("01:00:00:00").into_timecode(25.0).unwrap();
        assert_eq!(text.frame_rate().as_f64(), 25.0);

        let frames = TimecodeSource::from(50u64).into_timecode(25.0).unwrap();
        assert_eq!(frames.to_string(), "00:00:02:00");

        assert!(TimecodeSource::from("garbage").into_timecode(25.0).is_err());
        assert!(TimecodeSource::from("  ").is_blank());
    }

    #[test]
    fn test_timecode_source_deserialize() {
        let text: TimecodeSource = serde_json::from_str("\"00:00:01:00\"").unwrap();
        assert_eq!(text, TimecodeSource::Text("00:00:01:00".into()));
        let frames: TimecodeSource = serde_json::from_str("250").unwrap();
        assert_eq!(frames, TimecodeSource::Frames(250));
        assert!(serde_json::from_str::<TimecodeSource>("{}").is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let tc = Timecode::parse("10:00:00:00", 24.0).unwrap();
        assert_eq!(serde_json::to_value(tc).unwrap(), "10:00:00:00");
    }
}
