//! Sampler configuration.

use crate::error::{MonitorError, Result};
use crate::metrics::DEFAULT_DEVICE_PATHS;
use crate::sink::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// How many rounds to take and how far apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// One sample, then exit
    Single,
    /// A fixed number of samples, `interval` apart (zero means back to back)
    Counted { count: u64, interval: Duration },
    /// Sample every `interval` until interrupted
    Continuous { interval: Duration },
}

/// Configuration for a sampling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// IIO directories of the monitored devices, in CSV column order
    pub device_paths: Vec<PathBuf>,
    /// CSV target; samples go to the console when unset
    pub csv_file: Option<PathBuf>,
    /// Delay between samples in milliseconds
    pub interval_ms: u64,
    /// Number of samples to take, 0 for unbounded
    pub iterations: u64,
    /// Text for the CSV `comments` column
    pub comment: Option<String>,
    /// Console output format
    pub format: OutputFormat,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            device_paths: DEFAULT_DEVICE_PATHS.iter().map(PathBuf::from).collect(),
            csv_file: None,
            interval_ms: 0,
            iterations: 0,
            comment: None,
            format: OutputFormat::Pretty,
        }
    }
}

impl SamplerConfig {
    /// Replace the monitored devices.
    pub fn with_device_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.device_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Log samples to a CSV file instead of the console.
    pub fn with_csv_file(mut self, path: Option<PathBuf>) -> Self {
        self.csv_file = path;
        self
    }

    /// Set the delay between samples.
    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Set the number of samples.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Reject configurations that cannot produce a meaningful sample.
    pub fn validate(&self) -> Result<()> {
        if self.device_paths.is_empty() {
            return Err(MonitorError::config_error("at least one device path is required"));
        }
        if let Some(comment) = &self.comment {
            if comment.contains(['\n', '\r']) {
                return Err(MonitorError::config_error(
                    "comment must fit on a single CSV line",
                ));
            }
        }
        Ok(())
    }

    /// Execution mode implied by the interval and iteration count.
    pub fn run_mode(&self) -> RunMode {
        let interval = Duration::from_millis(self.interval_ms);
        match (self.interval_ms, self.iterations) {
            (0, 0) => RunMode::Single,
            (_, 0) => RunMode::Continuous { interval },
            (_, count) => RunMode::Counted { count, interval },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SamplerConfig::default();
        assert_eq!(config.device_paths.len(), DEFAULT_DEVICE_PATHS.len());
        assert!(config.csv_file.is_none());
        assert_eq!(config.run_mode(), RunMode::Single);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_run_modes() {
        let config = SamplerConfig::default().with_interval_ms(1000);
        assert_eq!(
            config.run_mode(),
            RunMode::Continuous {
                interval: Duration::from_secs(1)
            }
        );

        let config = SamplerConfig::default().with_iterations(5);
        assert_eq!(
            config.run_mode(),
            RunMode::Counted {
                count: 5,
                interval: Duration::ZERO
            }
        );

        let config = SamplerConfig::default()
            .with_iterations(3)
            .with_interval_ms(250);
        assert_eq!(
            config.run_mode(),
            RunMode::Counted {
                count: 3,
                interval: Duration::from_millis(250)
            }
        );
    }

    #[test]
    fn test_validation() {
        let empty: [&str; 0] = [];
        let config = SamplerConfig::default().with_device_paths(empty);
        assert!(matches!(config.validate(), Err(MonitorError::Config(_))));

        let config = SamplerConfig::default().with_comment(Some("a\nb".to_string()));
        assert!(config.validate().is_err());
    }
}
