//! Event construction settings
//!
//! The two clocks of an EDL can run at different rates: source clips keep
//! their own rate while the record side follows the program. `EventConfig`
//! carries both, plus output preferences, so callers can build and serialize
//! events without threading rates through every call.

use crate::event::Event;
use crate::types::{FrameRate, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration for building and serializing events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventConfig {
    /// Rate of the source clips (source in/out and motion effect entry points)
    #[serde(default)]
    pub source_frame_rate: FrameRate,

    /// Rate of the program timeline (record in/out)
    #[serde(default)]
    pub record_frame_rate: FrameRate,

    /// Indent JSON output
    #[serde(default)]
    pub pretty: bool,
}

impl EventConfig {
    /// Create a configuration with 29.97 on both clocks
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the source clock rate
    pub fn with_source_frame_rate(mut self, fps: impl Into<FrameRate>) -> Self {
        self.source_frame_rate = fps.into();
        self
    }

    /// Builder method: set the record clock rate
    pub fn with_record_frame_rate(mut self, fps: impl Into<FrameRate>) -> Self {
        self.record_frame_rate = fps.into();
        self
    }

    /// Builder method: set both clocks to the same rate
    pub fn with_frame_rate(self, fps: impl Into<FrameRate>) -> Self {
        let fps = fps.into();
        self.with_source_frame_rate(fps).with_record_frame_rate(fps)
    }

    /// Builder method: enable or disable indented JSON output
    pub fn with_pretty_output(mut self, enabled: bool) -> Self {
        self.pretty = enabled;
        self
    }

    /// Parse an event line at the configured rates
    pub fn event_from_text(&self, line: &str) -> Result<Event> {
        Event::from_text(line, self.source_frame_rate, self.record_frame_rate)
    }

    /// Build an event from an untyped value at the configured rates
    pub fn event_from_value(&self, value: Value) -> Result<Event> {
        Event::from_value(value, self.source_frame_rate, self.record_frame_rate)
    }

    /// Attach a motion effect line, read at the source rate
    pub fn attach_motion_effect(&self, event: &mut Event, line: &str) {
        event.set_motion_effect(line, self.source_frame_rate);
    }

    /// Serialize an event, honoring the `pretty` setting
    pub fn render(&self, event: &Event) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(&event.to_json()?)?)
        } else {
            event.to_json_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_FRAME_RATE;

    #[test]
    fn test_event_config_builder() {
        let config = EventConfig::new()
            .with_source_frame_rate(23.976)
            .with_record_frame_rate(25.0)
            .with_pretty_output(true);

        assert_eq!(config.source_frame_rate.as_f64(), 23.976);
        assert_eq!(config.record_frame_rate.as_f64(), 25.0);
        assert!(config.pretty);
    }

    #[test]
    fn test_defaults() {
        let config = EventConfig::new();
        assert_eq!(config.source_frame_rate.as_f64(), DEFAULT_FRAME_RATE);
        assert_eq!(config.record_frame_rate.as_f64(), DEFAULT_FRAME_RATE);
        assert!(!config.pretty);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: EventConfig =
            serde_json::from_str(r#"{ "record_frame_rate": 25.0 }"#).unwrap();
        assert_eq!(config.source_frame_rate.as_f64(), DEFAULT_FRAME_RATE);
        assert_eq!(config.record_frame_rate.as_f64(), 25.0);
    }

    #[test]
    fn test_render_pretty_and_compact() {
        let config = EventConfig::new().with_frame_rate(25.0);
        let event = config
            .event_from_text("003  AX  V  C  00:00:00:00 00:00:01:00 00:00:00:00 00:00:01:00")
            .unwrap();

        let compact = config.render(&event).unwrap();
        assert!(!compact.contains('\n'));

        let pretty = config.with_pretty_output(true).render(&event).unwrap();
        assert!(pretty.contains('\n'));
        assert_eq!(
            serde_json::from_str::<Value>(&compact).unwrap(),
            serde_json::from_str::<Value>(&pretty).unwrap()
        );
    }
}
