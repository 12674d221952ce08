//! Sample outputs: console printing and CSV logging.
//!
//! Every sink refreshes the device set itself before rendering, so emitting
//! a sample and taking it are the same step.

pub mod console;
pub mod csv;

pub use console::{print_json, print_values, render_json, render_values, OutputFormat};
pub use csv::{write_plain_row, write_row, write_row_with_comment, COMMENT_COLUMN};

use crate::metrics::DeviceSet;
use std::path::PathBuf;

/// Something that samples a device set and records the result.
pub trait Sink {
    /// Refresh `devices` and output one sample. Failures are absorbed.
    fn emit(&mut self, devices: &mut DeviceSet);
}

/// Prints samples to stdout.
#[derive(Debug, Clone, Default)]
pub struct ConsoleSink {
    format: OutputFormat,
}

impl ConsoleSink {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl Sink for ConsoleSink {
    fn emit(&mut self, devices: &mut DeviceSet) {
        match self.format {
            OutputFormat::Pretty => print_values(devices),
            OutputFormat::Json => print_json(devices),
        }
    }
}

/// Appends samples to a CSV file, optionally with a trailing comment column.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
    comment: String,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            comment: String::new(),
        }
    }

    /// Attach a comment written to the `comments` column of every row.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Sink for CsvSink {
    fn emit(&mut self, devices: &mut DeviceSet) {
        write_row_with_comment(&self.path, devices, &self.comment);
    }
}
