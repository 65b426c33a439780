//! EDL Event Library
//!
//! Typed model of a single event from a CMX3600 Edit Decision List.
//!
//! # Architecture
//!
//! The library works one line at a time:
//! - Parses an event line into an [`Event`] with typed timecodes
//! - Rebuilds an [`Event`] from a plain record (e.g. its own JSON output)
//! - Accumulates comment lines, recognizing source file and clip names
//! - Attaches `M2` motion effects on a best-effort basis
//! - Serializes back to JSON with timecodes as strings
//!
//! The library does NOT:
//! - Read whole EDL files (titles, FCM lines, multiple events)
//! - Validate frame numbers or timecode ranges
//! - Merge or reconcile events
//!
//! # Example Usage
//!
//! ```
//! use edl_event::Event;
//!
//! let mut event = Event::from_text(
//!     "001  AX  V  C  01:00:00:00 01:00:05:00 01:00:10:00 01:00:15:00",
//!     25.0,
//!     25.0,
//! )?;
//! event.add_comment("* FROM CLIP NAME: interview_take3.mov");
//! event.set_motion_effect("M2   AX       050.0      01:00:00:00", 25.0);
//!
//! let json = event.to_json()?;
//! assert_eq!(json["sourceStart"], "01:00:00:00");
//! assert_eq!(json["sourceClip"], "interview_take3.mov");
//! # Ok::<(), edl_event::EdlError>(())
//! ```

// Public modules
pub mod config;
pub mod event;
pub mod motion_effect;
pub mod patterns;
pub mod timecode;
pub mod types;

// Re-export main types for convenience
pub use config::EventConfig;
pub use event::{Comment, Event, EventRecord, Track};
pub use motion_effect::{MotionEffect, MotionEffectError, MotionEffectInput, MotionEffectRecord};
pub use timecode::{Timecode, TimecodeSource};
pub use types::{EdlError, FrameRate, Result, DEFAULT_FRAME_RATE, MAX_FRAME_RATE};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: an empty event serializes to an empty object
        let event = Event::new();
        assert!(event.is_empty());
        assert_eq!(event.to_json_string().unwrap(), "{}");
    }
}
