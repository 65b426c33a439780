//! Motion effect (`M2`) records
//!
//! An `M2` line follows the event it retimes:
//!
//! ```text
//! M2   AX       050.0                01:00:00:00
//! ```
//!
//! The speed is in frames per second; a negative speed plays the clip in
//! reverse. The entry point is a source timecode.

use crate::patterns;
use crate::timecode::{Timecode, TimecodeSource};
use crate::types::FrameRate;
use serde::{Deserialize, Serialize};

/// Reasons a motion effect could not be built
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MotionEffectError {
    #[error("not a motion effect line: {0:?}")]
    NotMotionEffect(String),

    #[error("invalid motion effect speed: {0:?}")]
    InvalidSpeed(String),

    #[error("invalid motion effect entry point: {0:?}")]
    InvalidEntryPoint(String),
}

/// Speed change applied to an event's source clip
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionEffect {
    /// Reel the effect applies to
    pub reel: String,
    /// Playback speed in frames per second
    pub speed: f64,
    /// Source timecode where the effect starts
    pub entry_point: Timecode,
}

/// Plain-data form of a motion effect, as found in a serialized event
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionEffectRecord {
    pub reel: String,
    pub speed: f64,
    pub entry_point: TimecodeSource,
}

impl From<MotionEffect> for MotionEffectRecord {
    fn from(effect: MotionEffect) -> Self {
        Self {
            reel: effect.reel,
            speed: effect.speed,
            entry_point: effect.entry_point.into(),
        }
    }
}

/// Anything a motion effect can be built from
#[derive(Debug, Clone, PartialEq)]
pub enum MotionEffectInput {
    /// A raw `M2` line
    Text(String),
    /// Structured data, e.g. a deserialized `motionEffect` object
    Record(MotionEffectRecord),
}

impl From<&str> for MotionEffectInput {
    fn from(text: &str) -> Self {
        MotionEffectInput::Text(text.to_string())
    }
}

impl From<String> for MotionEffectInput {
    fn from(text: String) -> Self {
        MotionEffectInput::Text(text)
    }
}

impl From<MotionEffectRecord> for MotionEffectInput {
    fn from(record: MotionEffectRecord) -> Self {
        MotionEffectInput::Record(record)
    }
}

impl From<MotionEffect> for MotionEffectInput {
    fn from(effect: MotionEffect) -> Self {
        MotionEffectInput::Record(effect.into())
    }
}

impl MotionEffect {
    /// Build from any supported input
    pub fn build(
        input: impl Into<MotionEffectInput>,
        frame_rate: impl Into<FrameRate>,
    ) -> Result<Self, MotionEffectError> {
        match input.into() {
            MotionEffectInput::Text(text) => Self::from_text(&text, frame_rate),
            MotionEffectInput::Record(record) => Self::from_record(record, frame_rate),
        }
    }

    /// Build from plain data; a text entry point is read at `frame_rate`
    pub fn from_record(
        record: MotionEffectRecord,
        frame_rate: impl Into<FrameRate>,
    ) -> Result<Self, MotionEffectError> {
        if !record.speed.is_finite() {
            return Err(MotionEffectError::InvalidSpeed(record.speed.to_string()));
        }
        let label = match &record.entry_point {
            TimecodeSource::Timecode(tc) => tc.to_string(),
            TimecodeSource::Text(text) => text.clone(),
            TimecodeSource::Frames(count) => count.to_string(),
        };
        let entry_point = record
            .entry_point
            .into_timecode(frame_rate)
            .map_err(|_| MotionEffectError::InvalidEntryPoint(label))?;

        Ok(Self {
            reel: record.reel,
            speed: record.speed,
            entry_point,
        })
    }

    /// Parse an `M2` line, reading the entry point at `frame_rate`
    pub fn from_text(
        input: &str,
        frame_rate: impl Into<FrameRate>,
    ) -> Result<Self, MotionEffectError> {
        let caps = patterns::MOTION_EFFECT
            .captures(input)
            .ok_or_else(|| MotionEffectError::NotMotionEffect(input.to_string()))?;

        let speed = caps[2]
            .parse::<f64>()
            .map_err(|_| MotionEffectError::InvalidSpeed(caps[2].to_string()))?;
        let entry_point = Timecode::parse(&caps[3], frame_rate)
            .map_err(|_| MotionEffectError::InvalidEntryPoint(caps[3].to_string()))?;

        Ok(Self {
            reel: caps[1].to_string(),
            speed,
            entry_point,
        })
    }

    /// True when the clip plays backwards
    pub fn is_reverse(&self) -> bool {
        self.speed < 0.0
    }

    /// Speed as a fraction of the entry point's frame rate (1.0 = normal)
    pub fn speed_ratio(&self) -> f64 {
        self.speed / self.entry_point.frame_rate().as_f64()
    }
}
