//! EDL Event CLI Application
//!
//! Command-line front end for the edl-event library. It works on one event
//! at a time:
//! - `event`: parse an event line plus its comment and M2 lines into JSON
//! - `normalize`: rebuild serialized events at the configured frame rates

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use edl_event::{EventConfig, FrameRate};
use std::path::PathBuf;

mod config;
mod output;

/// EDL Event - Build and normalize CMX3600 event records
#[derive(Parser, Debug)]
#[command(name = "edl-event-cli")]
#[command(about = "Build and normalize CMX3600 EDL event records", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Source clip frame rate (overrides config)
    #[arg(long, value_name = "FPS", global = true)]
    source_fps: Option<String>,

    /// Record frame rate (overrides config)
    #[arg(long, value_name = "FPS", global = true)]
    record_fps: Option<String>,

    /// Output file for JSON (default: stdout)
    #[arg(short, long, value_name = "FILE", global = true)]
    output: Option<PathBuf>,

    /// Indent JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one event line into JSON
    Event {
        /// The event line, e.g. "001  AX  V  C  01:00:00:00 01:00:05:00 01:00:10:00 01:00:15:00"
        line: String,

        /// Comment line to add (can be repeated, applied in order)
        #[arg(long = "comment", value_name = "TEXT")]
        comments: Vec<String>,

        /// M2 motion effect line to attach
        #[arg(long, value_name = "LINE")]
        motion_effect: Option<String>,
    },

    /// Rebuild serialized events (one object or an array) at the configured rates
    Normalize {
        /// JSON file to read (default: stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("EDL Event CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using edl-event library v{}", edl_event::VERSION);

    let (event_config, config_output) = resolve_config(&args)?;
    let output_path = args.output.clone().or(config_output);

    let rendered = match &args.command {
        Command::Event {
            line,
            comments,
            motion_effect,
        } => event_command(&event_config, line, comments, motion_effect.as_deref())?,
        Command::Normalize { input } => normalize_command(&event_config, input.as_deref())?,
    };

    output::write(output_path.as_deref(), &rendered)
}

/// Merge the config file (if any) with command-line overrides
fn resolve_config(args: &Args) -> Result<(EventConfig, Option<PathBuf>)> {
    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    let mut event_config = app_config.event_config();
    if let Some(fps) = &args.source_fps {
        event_config = event_config.with_source_frame_rate(FrameRate::parse_lossy(fps));
    }
    if let Some(fps) = &args.record_fps {
        event_config = event_config.with_record_frame_rate(FrameRate::parse_lossy(fps));
    }
    if args.pretty {
        event_config = event_config.with_pretty_output(true);
    }

    log::debug!(
        "Frame rates: source {} fps, record {} fps",
        event_config.source_frame_rate,
        event_config.record_frame_rate
    );

    Ok((event_config, app_config.output.file))
}

fn event_command(
    config: &EventConfig,
    line: &str,
    comments: &[String],
    motion_effect: Option<&str>,
) -> Result<String> {
    let mut event = config
        .event_from_text(line)
        .with_context(|| format!("Failed to parse event line: {line:?}"))?;

    for comment in comments {
        event.add_comment(comment);
    }

    if let Some(effect) = motion_effect {
        if let Err(e) = event.try_set_motion_effect(effect, config.source_frame_rate) {
            log::warn!("Ignoring motion effect: {}", e);
        }
    }

    Ok(config.render(&event)?)
}

fn normalize_command(config: &EventConfig, input: Option<&std::path::Path>) -> Result<String> {
    let text = output::read(input)?;
    let value: serde_json::Value =
        serde_json::from_str(&text).context("Input is not valid JSON")?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        single => {
            let event = config
                .event_from_value(single)
                .context("Failed to rebuild event")?;
            return Ok(config.render(&event)?);
        }
    };

    let values = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            config
                .event_from_value(item)
                .and_then(|event| event.to_json())
                .with_context(|| format!("Failed to rebuild event at index {i}"))
        })
        .collect::<Result<Vec<_>>>()?;

    log::info!("Normalized {} event(s)", values.len());

    let array = serde_json::Value::Array(values);
    if config.pretty {
        Ok(serde_json::to_string_pretty(&array)?)
    } else {
        Ok(serde_json::to_string(&array)?)
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "001  AX  V  C  01:00:00:00 01:00:05:00 01:00:10:00 01:00:15:00";

    #[test]
    fn test_event_command_output() {
        let config = EventConfig::new().with_frame_rate(25.0);
        let rendered = event_command(
            &config,
            LINE,
            &["* FROM CLIP NAME: shot_01".to_string(), "* hi".to_string()],
            Some("M2 AX 050.0 01:00:00:00"),
        )
        .unwrap();

        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(json["sourceClip"], "shot_01");
        assert_eq!(json["comment"], "hi");
        assert_eq!(json["motionEffect"]["speed"], 50.0);
    }

    #[test]
    fn test_event_command_rejects_bad_line() {
        let config = EventConfig::new();
        let err = event_command(&config, "TITLE: nope", &[], None).unwrap_err();
        assert!(err.to_string().contains("Failed to parse event line"));
    }

    #[test]
    fn test_event_command_skips_bad_motion_effect() {
        let config = EventConfig::new().with_frame_rate(25.0);
        let rendered = event_command(&config, LINE, &[], Some("M2 broken")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert!(json.get("motionEffect").is_none());
    }

    #[test]
    fn test_normalize_command_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r#"[{"reel":"AX","sourceStart":"01:00:00:00","take":3}, null]"#,
        )
        .unwrap();

        let config = EventConfig::new().with_frame_rate(25.0);
        let rendered = normalize_command(&config, Some(path.as_path())).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(json[0]["sourceStart"], "01:00:00:00");
        assert_eq!(json[0]["take"], 3);
        assert_eq!(json[1], serde_json::json!({}));
    }

    #[test]
    fn test_normalize_command_rejects_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("event.json");
        std::fs::write(&path, "42").unwrap();

        let err = normalize_command(&EventConfig::new(), Some(path.as_path())).unwrap_err();
        assert!(format!("{err:#}").contains("Event must be created from an Object or String."));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "edl-event-cli",
            "event",
            LINE,
            "--comment",
            "* a",
            "--comment",
            "* b",
            "--source-fps",
            "24",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.verbose, 2);
        assert_eq!(args.source_fps.as_deref(), Some("24"));
        match args.command {
            Command::Event { comments, .. } => assert_eq!(comments, vec!["* a", "* b"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
