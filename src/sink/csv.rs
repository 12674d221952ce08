//! Append-or-create CSV logging of samples.
//!
//! The first line of a file is the header
//! `date,time,<rail> voltage,<rail> current,<rail> power,...[,<extra names>]`
//! and every following line is one sample with the same column count.
//! Whether to write the header is decided per call from file existence, so a
//! fresh process can keep appending to the file of an earlier run as long as
//! the device topology has not changed.

use crate::error::Result;
use crate::metrics::DeviceSet;
use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Header cell of the comment overload.
pub const COMMENT_COLUMN: &str = "comments";

/// `YYYY-MM-DD,HH:MM:SS:mmm`, milliseconds truncated.
pub(crate) fn format_timestamp(now: &DateTime<Local>) -> String {
    format!(
        "{}:{:03}",
        now.format("%Y-%m-%d,%H:%M:%S"),
        now.timestamp_subsec_millis().min(999)
    )
}

/// Sample `devices` and append one row to `path`.
///
/// `extra_fields` become trailing columns in the given order: names in the
/// header, values in the row. The header is only written when `path` does
/// not exist yet. Failing to open or write the file is logged and otherwise
/// ignored so that a long-running sampling loop is never interrupted.
pub fn write_row<K, V>(path: &Path, devices: &mut DeviceSet, extra_fields: &[(K, V)])
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if let Err(err) = try_write_row(path, devices, extra_fields) {
        warn!("Skipped CSV row for {}: {}", path.display(), err);
    }
}

/// Like [`write_row`] with a single trailing `comments` column. An empty
/// comment adds no column at all.
pub fn write_row_with_comment(path: &Path, devices: &mut DeviceSet, comment: &str) {
    if comment.is_empty() {
        write_plain_row(path, devices);
    } else {
        write_row(path, devices, &[(COMMENT_COLUMN, comment)]);
    }
}

/// [`write_row`] without extra columns.
pub fn write_plain_row(path: &Path, devices: &mut DeviceSet) {
    write_row::<&str, &str>(path, devices, &[]);
}

fn try_write_row<K, V>(path: &Path, devices: &mut DeviceSet, extra_fields: &[(K, V)]) -> Result<()>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let needs_header = !path.exists();

    // Opened before sampling so an unwritable target skips the round entirely.
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut buf = String::new();
    if needs_header {
        buf.push_str("date,time,");
        buf.push_str(&devices.csv_header());
        for (name, _) in extra_fields {
            buf.push(',');
            buf.push_str(name.as_ref());
        }
        buf.push('\n');
    }

    devices.refresh();
    let now = Local::now();

    buf.push_str(&format_timestamp(&now));
    buf.push(',');
    buf.push_str(&devices.to_csv_segment());
    for (_, value) in extra_fields {
        buf.push(',');
        buf.push_str(value.as_ref());
    }
    buf.push('\n');

    file.write_all(buf.as_bytes())?;
    debug!(
        "Appended CSV row to {}{}",
        path.display(),
        if needs_header { " (with header)" } else { "" }
    );
    Ok(())
}
