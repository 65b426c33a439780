//! Core types shared across the EDL event library
//!
//! This module defines the error type, the crate-wide `Result` alias and the
//! frame rate newtype that every timecode is tied to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for EDL event operations
pub type Result<T> = std::result::Result<T, EdlError>;

/// Frame rate used when a caller supplies something that is not a usable number
pub const DEFAULT_FRAME_RATE: f64 = 29.97;

/// Highest frame rate accepted before falling back to the default
pub const MAX_FRAME_RATE: f64 = 1000.0;

/// Errors that can occur while building or serializing an event
#[derive(Debug, thiserror::Error)]
pub enum EdlError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Event must be created from an Object or String.")]
    InvalidConstructionSource,

    #[error("Invalid timecode: {0}")]
    InvalidTimecode(String),

    #[error("Invalid event record: {0}")]
    InvalidRecord(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Frames per second for a timecode clock
///
/// Construction never fails. Anything that is not a positive, finite number
/// no greater than [`MAX_FRAME_RATE`] resolves to [`DEFAULT_FRAME_RATE`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct FrameRate(f64);

impl FrameRate {
    /// Create a frame rate, falling back to the default for invalid values
    pub fn new(fps: f64) -> Self {
        if fps.is_finite() && fps > 0.0 && fps <= MAX_FRAME_RATE {
            Self(fps)
        } else {
            Self(DEFAULT_FRAME_RATE)
        }
    }

    /// Parse a frame rate from text, falling back to the default
    pub fn parse_lossy(text: &str) -> Self {
        text.trim()
            .parse::<f64>()
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }

    /// Whole frames counted per second (30 for 29.97, 24 for 23.976)
    pub fn nominal(&self) -> u64 {
        (self.0.round() as u64).max(1)
    }

    /// True for the NTSC fractional rates that use drop-frame counting
    pub fn is_ntsc_drop(&self) -> bool {
        (self.0 - 29.97).abs() < 0.01 || (self.0 - 59.94).abs() < 0.01
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self(DEFAULT_FRAME_RATE)
    }
}

impl From<f64> for FrameRate {
    fn from(fps: f64) -> Self {
        Self::new(fps)
    }
}

impl From<Option<f64>> for FrameRate {
    fn from(fps: Option<f64>) -> Self {
        fps.map(Self::new).unwrap_or_default()
    }
}

impl From<FrameRate> for f64 {
    fn from(rate: FrameRate) -> Self {
        rate.0
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
