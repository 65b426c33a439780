//! Input and output plumbing for the CLI (file or stdin/stdout)

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Read all of `path`, or stdin when no path is given
pub fn read(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {:?}", path)),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Write `text` plus a trailing newline to `path`, or stdout
pub fn write(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, format!("{text}\n"))
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            log::info!("Wrote {:?}", path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{text}").context("Failed to write stdout")?;
        }
    }
    Ok(())
}
