//! The EDL event record
//!
//! An [`Event`] is one edit instruction. It is built once, from a raw event
//! line or from a plain record, then enriched through [`Event::add_comment`]
//! and [`Event::set_motion_effect`] and finally serialized with
//! [`Event::to_json`].

mod comment;
mod track;

pub use comment::Comment;
pub use track::Track;

use crate::motion_effect::{MotionEffect, MotionEffectError, MotionEffectInput};
use crate::patterns;
use crate::timecode::{Timecode, TimecodeSource};
use crate::types::{EdlError, FrameRate, Result};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single CMX3600 event
///
/// Every field is optional: an event built with [`Event::new`] has none set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    track_type: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    track_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_start: Option<Timecode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_end: Option<Timecode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    record_start: Option<Timecode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    record_end: Option<Timecode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_clip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    motion_effect: Option<MotionEffect>,
    /// Fields of a plain record this library does not interpret
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Plain-data form of an event, e.g. a previously serialized one
///
/// Timecode slots may hold text, a frame count or an already-typed
/// [`Timecode`]. A `motionEffect` that is neither an `M2` line nor a
/// well-formed object reads as absent. Unknown fields land in `extra`, and
/// so does a known field whose value does not fit its type (a negative
/// `number`, a multi-letter `trackType`), which keeps it in the output
/// exactly as it came in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRecord {
    pub number: Option<u32>,
    pub reel: Option<String>,
    pub track_type: Option<char>,
    pub track_number: Option<u32>,
    pub transition: Option<String>,
    pub source_start: Option<TimecodeSource>,
    pub source_end: Option<TimecodeSource>,
    pub record_start: Option<TimecodeSource>,
    pub record_end: Option<TimecodeSource>,
    pub comment: Option<String>,
    pub source_file: Option<String>,
    pub source_clip: Option<String>,
    pub motion_effect: Option<MotionEffectInput>,
    pub extra: Map<String, Value>,
}

impl EventRecord {
    /// Split a JSON object into typed fields and passthrough fields
    ///
    /// Fails only when a timecode slot holds something that is neither text
    /// nor a frame count.
    pub fn from_map(mut fields: Map<String, Value>) -> Result<Self> {
        Ok(Self {
            number: take_typed(&mut fields, "number"),
            reel: take_typed(&mut fields, "reel"),
            track_type: take_typed(&mut fields, "trackType"),
            track_number: take_typed(&mut fields, "trackNumber"),
            transition: take_typed(&mut fields, "transition"),
            source_start: take_timecode(&mut fields, "sourceStart")?,
            source_end: take_timecode(&mut fields, "sourceEnd")?,
            record_start: take_timecode(&mut fields, "recordStart")?,
            record_end: take_timecode(&mut fields, "recordEnd")?,
            comment: take_typed(&mut fields, "comment"),
            source_file: take_typed(&mut fields, "sourceFile"),
            source_clip: take_typed(&mut fields, "sourceClip"),
            motion_effect: fields
                .remove("motionEffect")
                .and_then(lenient_motion_effect),
            extra: fields,
        })
    }
}

impl<'de> Deserialize<'de> for EventRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let fields = Map::deserialize(deserializer)?;
        EventRecord::from_map(fields).map_err(de::Error::custom)
    }
}

impl From<Event> for EventRecord {
    fn from(event: Event) -> Self {
        Self {
            number: event.number,
            reel: event.reel,
            track_type: event.track_type,
            track_number: event.track_number,
            transition: event.transition,
            source_start: event.source_start.map(Into::into),
            source_end: event.source_end.map(Into::into),
            record_start: event.record_start.map(Into::into),
            record_end: event.record_end.map(Into::into),
            comment: event.comment,
            source_file: event.source_file,
            source_clip: event.source_clip,
            motion_effect: event.motion_effect.map(Into::into),
            extra: event.extra,
        }
    }
}

impl Event {
    /// An event with no fields set, to be filled through the mutating calls
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw event line
    ///
    /// Source timecodes are read at `source_rate`, record timecodes at
    /// `record_rate`.
    pub fn from_text(
        line: &str,
        source_rate: impl Into<FrameRate>,
        record_rate: impl Into<FrameRate>,
    ) -> Result<Self> {
        let source_rate = source_rate.into();
        let record_rate = record_rate.into();

        let caps = patterns::EVENT
            .captures(line)
            .ok_or_else(|| EdlError::MalformedInput(format!("not an event line: {line:?}")))?;

        let number = caps[1].parse::<u32>().map_err(|_| {
            EdlError::MalformedInput(format!("event number out of range: {}", &caps[1]))
        })?;
        let track = Track::parse(&caps[3])?;

        let event = Self {
            number: Some(number),
            reel: Some(caps[2].to_string()),
            track_type: Some(track.kind),
            track_number: track.number,
            transition: Some(caps[4].to_string()),
            source_start: Some(Timecode::parse(&caps[5], source_rate)?),
            source_end: Some(Timecode::parse(&caps[6], source_rate)?),
            record_start: Some(Timecode::parse(&caps[7], record_rate)?),
            record_end: Some(Timecode::parse(&caps[8], record_rate)?),
            ..Self::default()
        };

        log::debug!(
            "Parsed event {} (reel {}, track {}, transition {})",
            number,
            &caps[2],
            track,
            &caps[4]
        );

        Ok(event)
    }

    /// Build from a plain record, normalizing its timecodes
    ///
    /// Slots that already hold a [`Timecode`] are kept as they are. A
    /// `motionEffect` that cannot be built is dropped, the same way
    /// [`Event::set_motion_effect`] drops one.
    pub fn from_record(
        record: EventRecord,
        source_rate: impl Into<FrameRate>,
        record_rate: impl Into<FrameRate>,
    ) -> Result<Self> {
        let source_rate = source_rate.into();
        let record_rate = record_rate.into();

        let mut event = Self {
            number: record.number,
            reel: record.reel,
            track_type: record.track_type,
            track_number: record.track_number,
            transition: record.transition,
            source_start: normalize(record.source_start, source_rate)?,
            source_end: normalize(record.source_end, source_rate)?,
            record_start: normalize(record.record_start, record_rate)?,
            record_end: normalize(record.record_end, record_rate)?,
            comment: record.comment,
            source_file: record.source_file,
            source_clip: record.source_clip,
            motion_effect: None,
            extra: record.extra,
        };

        if let Some(effect) = record.motion_effect {
            event.set_motion_effect(effect, source_rate);
        }

        log::debug!("Built event {:?} from record", event.number);

        Ok(event)
    }

    /// Build from an untyped value
    ///
    /// Falsy values (`null`, `false`, `0`, `""`) give an empty event. A string
    /// is parsed as an event line and an object as an [`EventRecord`].
    /// Anything else, including a string that is not an event line, is
    /// rejected with [`EdlError::InvalidConstructionSource`].
    pub fn from_value(
        value: Value,
        source_rate: impl Into<FrameRate>,
        record_rate: impl Into<FrameRate>,
    ) -> Result<Self> {
        match value {
            Value::Null | Value::Bool(false) => Ok(Self::new()),
            Value::Number(ref n) if n.as_f64() == Some(0.0) => Ok(Self::new()),
            Value::String(ref line) if line.is_empty() => Ok(Self::new()),
            Value::String(ref line) if patterns::EVENT.is_match(line) => {
                Self::from_text(line, source_rate, record_rate)
            }
            Value::Object(fields) => {
                let record = EventRecord::from_map(fields)?;
                Self::from_record(record, source_rate, record_rate)
            }
            _ => Err(EdlError::InvalidConstructionSource),
        }
    }

    /// Add one comment line
    ///
    /// `* SOURCE FILE:` and `* FROM CLIP NAME:` lines replace `source_file`
    /// and `source_clip`. Anything else is trimmed and appended to `comment`
    /// with no separator.
    pub fn add_comment(&mut self, text: &str) {
        let parsed = Comment::parse(text);
        log::trace!("Comment on event {:?}: {:?}", self.number, parsed);

        match parsed {
            Comment::SourceFile(file) => self.source_file = Some(file),
            Comment::SourceClip(clip) => self.source_clip = Some(clip),
            Comment::Text(text) => match self.comment.as_mut() {
                Some(existing) => existing.push_str(&text),
                None => self.comment = Some(text),
            },
        }
    }

    /// Attach a motion effect if `input` describes a valid one
    ///
    /// An invalid description leaves the event unchanged.
    pub fn set_motion_effect(
        &mut self,
        input: impl Into<MotionEffectInput>,
        frame_rate: impl Into<FrameRate>,
    ) {
        let _ = self.try_set_motion_effect(input, frame_rate);
    }

    /// Attach a motion effect, returning why it could not be built
    pub fn try_set_motion_effect(
        &mut self,
        input: impl Into<MotionEffectInput>,
        frame_rate: impl Into<FrameRate>,
    ) -> std::result::Result<(), MotionEffectError> {
        self.motion_effect = Some(MotionEffect::build(input, frame_rate)?);
        Ok(())
    }

    /// JSON structure with timecodes rendered as strings
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// JSON text of [`Event::to_json`]
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn number(&self) -> Option<u32> {
        self.number
    }

    pub fn reel(&self) -> Option<&str> {
        self.reel.as_deref()
    }

    pub fn track_type(&self) -> Option<char> {
        self.track_type
    }

    pub fn track_number(&self) -> Option<u32> {
        self.track_number
    }

    /// Track kind and number together
    pub fn track(&self) -> Option<Track> {
        self.track_type.map(|kind| Track {
            kind,
            number: self.track_number,
        })
    }

    pub fn transition(&self) -> Option<&str> {
        self.transition.as_deref()
    }

    pub fn source_start(&self) -> Option<&Timecode> {
        self.source_start.as_ref()
    }

    pub fn source_end(&self) -> Option<&Timecode> {
        self.source_end.as_ref()
    }

    pub fn record_start(&self) -> Option<&Timecode> {
        self.record_start.as_ref()
    }

    pub fn record_end(&self) -> Option<&Timecode> {
        self.record_end.as_ref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn source_file(&self) -> Option<&str> {
        self.source_file.as_deref()
    }

    pub fn source_clip(&self) -> Option<&str> {
        self.source_clip.as_deref()
    }

    pub fn motion_effect(&self) -> Option<&MotionEffect> {
        self.motion_effect.as_ref()
    }

    /// Record fields carried through without interpretation
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// True when no field at all is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Move `key` out of `fields` if its value reads as `T`, else leave it there
fn take_typed<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    let typed = T::deserialize(fields.get(key)?).ok()?;
    fields.remove(key);
    Some(typed)
}

fn take_timecode(fields: &mut Map<String, Value>, key: &str) -> Result<Option<TimecodeSource>> {
    match fields.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => TimecodeSource::deserialize(value)
            .map(Some)
            .map_err(|e| EdlError::InvalidRecord(format!("{key}: {e}"))),
    }
}

fn lenient_motion_effect(value: Value) -> Option<MotionEffectInput> {
    match value {
        Value::String(line) => Some(MotionEffectInput::Text(line)),
        value @ Value::Object(_) => serde_json::from_value(value)
            .ok()
            .map(MotionEffectInput::Record),
        _ => None,
    }
}

fn normalize(slot: Option<TimecodeSource>, rate: FrameRate) -> Result<Option<Timecode>> {
    match slot {
        Some(source) if !source.is_blank() => source.into_timecode(rate).map(Some),
        _ => Ok(None),
    }
}
