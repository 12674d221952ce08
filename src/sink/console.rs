//! Human-readable and JSON console output.

use crate::error::Result;
use crate::metrics::DeviceSet;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use tracing::debug;

/// How samples are printed to the console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Timestamp line followed by the nested device/rail layout
    #[default]
    Pretty,
    /// One JSON object per sample
    Json,
}

/// Sample `devices` and write the nested layout to `out`.
pub fn render_values<W: Write>(devices: &mut DeviceSet, out: &mut W) -> io::Result<()> {
    devices.refresh();

    // ctime(3) without the trailing year
    writeln!(out, "{}", Local::now().format("%a %b %e %H:%M:%S"))?;
    for device in devices.devices() {
        writeln!(out, "{}", device)?;
    }
    Ok(())
}

/// Sample `devices` and write one JSON line to `out`.
pub fn render_json<W: Write>(devices: &mut DeviceSet, out: &mut W) -> Result<()> {
    devices.refresh();
    serde_json::to_writer(&mut *out, &devices.snapshot())?;
    writeln!(out)?;
    Ok(())
}

/// Sample `devices` and print them to stdout. Never fails; unreadable
/// sensors show up as -1.
pub fn print_values(devices: &mut DeviceSet) {
    let stdout = io::stdout();
    if let Err(err) = render_values(devices, &mut stdout.lock()) {
        debug!("Failed to print sample: {}", err);
    }
}

/// JSON counterpart of [`print_values`].
pub fn print_json(devices: &mut DeviceSet) {
    let stdout = io::stdout();
    if let Err(err) = render_json(devices, &mut stdout.lock()) {
        debug!("Failed to print sample: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{Sample, RAILS_PER_DEVICE};

    #[test]
    fn test_render_values_layout() {
        let mut devices = DeviceSet::from_paths(["/nonexistent/a", "/nonexistent/b"]);
        let mut out = Vec::new();
        render_values(&mut devices, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        // timestamp + per device ("Rails:" + 4 lines per rail)
        assert_eq!(lines.len(), 1 + 2 * (1 + 4 * RAILS_PER_DEVICE));
        assert_eq!(lines[0].len(), 19);
        assert_eq!(lines[1], "Rails:");
        assert!(lines[3].ends_with("value:-1"));
    }

    #[test]
    fn test_render_json() {
        let mut devices = DeviceSet::from_paths(["/nonexistent/a"]);
        let mut out = Vec::new();
        render_json(&mut devices, &mut out).unwrap();

        let sample: Sample = serde_json::from_slice(&out).unwrap();
        assert_eq!(sample.devices.len(), 1);
        assert!(sample.devices[0]
            .rails
            .iter()
            .all(|rail| rail.voltage == -1.0 && rail.current == -1.0 && rail.power == -1.0));
    }

    #[test]
    fn test_output_format_serialization() {
        assert_eq!(serde_json::to_string(&OutputFormat::Json).unwrap(), "\"json\"");
        assert_eq!(OutputFormat::default(), OutputFormat::Pretty);
    }
}
