//! Configuration loading and parsing

use anyhow::{Context, Result};
use edl_event::{EventConfig, FrameRate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub frame_rates: FrameRatesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FrameRatesConfig {
    /// Source clip rate; missing or invalid values fall back to 29.97
    pub source: Option<f64>,
    /// Program rate; missing or invalid values fall back to 29.97
    pub record: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub pretty: bool,
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Library settings for this configuration
    pub fn event_config(&self) -> EventConfig {
        EventConfig::new()
            .with_source_frame_rate(FrameRate::from(self.frame_rates.source))
            .with_record_frame_rate(FrameRate::from(self.frame_rates.record))
            .with_pretty_output(self.output.pretty)
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [frame_rates]
            source = 23.976
            record = 25

            [output]
            pretty = true
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        let event_config = config.event_config();
        assert_eq!(event_config.source_frame_rate.as_f64(), 23.976);
        assert_eq!(event_config.record_frame_rate.as_f64(), 25.0);
        assert!(event_config.pretty);
    }

    #[test]
    fn test_missing_tables_use_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let event_config = config.event_config();
        assert_eq!(event_config, EventConfig::new());
    }

    #[test]
    fn test_invalid_rate_falls_back() {
        let config: AppConfig = toml::from_str("[frame_rates]\nsource = 0.0").unwrap();
        assert_eq!(
            config.event_config().source_frame_rate,
            FrameRate::default()
        );
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[frame_rates]\nrecord = 24.0\n[output]\nfile = \"out.json\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.frame_rates.record, Some(24.0));
        assert_eq!(config.output.file, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/edl.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
