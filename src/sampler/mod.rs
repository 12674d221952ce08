//! Driving loop: takes samples in one of the [`RunMode`]s and hands each
//! one to a [`Sink`].
//!
//! Sampling itself is synchronous. The loop only awaits between rounds, and
//! the `running` flag is checked at those boundaries, so a round that has
//! started always covers every device, rail and point.

pub mod config;

pub use config::{RunMode, SamplerConfig};

use crate::error::Result;
use crate::metrics::DeviceSet;
use crate::sink::{ConsoleSink, CsvSink, Sink};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info};

/// Owns the device set and the sink for the lifetime of a run.
pub struct Sampler {
    devices: DeviceSet,
    sink: Box<dyn Sink + Send>,
}

impl Sampler {
    pub fn new(devices: DeviceSet, sink: Box<dyn Sink + Send>) -> Self {
        Self { devices, sink }
    }

    /// Build the device set and sink described by `config`.
    pub fn from_config(config: &SamplerConfig) -> Result<Self> {
        config.validate()?;

        let devices = DeviceSet::from_paths(config.device_paths.iter().cloned());
        let sink: Box<dyn Sink + Send> = match &config.csv_file {
            Some(path) => {
                info!("Logging samples to {}", path.display());
                let sink = CsvSink::new(path.clone());
                Box::new(match &config.comment {
                    Some(comment) => sink.with_comment(comment.clone()),
                    None => sink,
                })
            }
            None => Box::new(ConsoleSink::new(config.format)),
        };

        info!("Monitoring {} device(s)", devices.len());
        Ok(Self::new(devices, sink))
    }

    /// Take one sample.
    pub fn sample_once(&mut self) {
        self.sink.emit(&mut self.devices);
    }

    /// Run `mode` until it completes or `running` is cleared. Returns the
    /// number of samples taken.
    pub async fn run(&mut self, mode: RunMode, running: &AtomicBool) -> u64 {
        let mut rounds = 0;
        match mode {
            RunMode::Single => {
                self.sample_once();
                rounds = 1;
            }
            RunMode::Counted { count, interval } => {
                while rounds < count && running.load(Ordering::SeqCst) {
                    self.sample_once();
                    rounds += 1;
                    if rounds < count {
                        pause(interval).await;
                    }
                }
            }
            RunMode::Continuous { interval } => {
                while running.load(Ordering::SeqCst) {
                    self.sample_once();
                    rounds += 1;
                    pause(interval).await;
                }
            }
        }
        debug!("Sampler finished after {} round(s)", rounds);
        rounds
    }

    pub fn devices(&self) -> &DeviceSet {
        &self.devices
    }
}

async fn pause(interval: Duration) {
    if !interval.is_zero() {
        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Counts emitted samples and clears the running flag after `stop_after`.
    struct CountingSink {
        emitted: Arc<std::sync::atomic::AtomicU64>,
        stop_after: u64,
        running: Arc<AtomicBool>,
    }

    impl Sink for CountingSink {
        fn emit(&mut self, devices: &mut DeviceSet) {
            devices.refresh();
            let n = self.emitted.fetch_add(1, Ordering::SeqCst) + 1;
            if n >= self.stop_after {
                self.running.store(false, Ordering::SeqCst);
            }
        }
    }

    fn counting_sampler(stop_after: u64) -> (Sampler, Arc<std::sync::atomic::AtomicU64>, Arc<AtomicBool>) {
        let emitted = Arc::new(std::sync::atomic::AtomicU64::new(0));
        let running = Arc::new(AtomicBool::new(true));
        let sink = CountingSink {
            emitted: emitted.clone(),
            stop_after,
            running: running.clone(),
        };
        let devices = DeviceSet::from_paths(["/nonexistent/a"]);
        (Sampler::new(devices, Box::new(sink)), emitted, running)
    }

    #[tokio::test]
    async fn test_single_mode() {
        let (mut sampler, emitted, running) = counting_sampler(u64::MAX);
        assert_eq!(sampler.run(RunMode::Single, &running).await, 1);
        assert_eq!(emitted.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_counted_mode() {
        let (mut sampler, emitted, running) = counting_sampler(u64::MAX);
        let mode = RunMode::Counted {
            count: 4,
            interval: Duration::from_millis(1),
        };
        assert_eq!(sampler.run(mode, &running).await, 4);
        assert_eq!(emitted.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_continuous_mode_stops_on_flag() {
        let (mut sampler, emitted, running) = counting_sampler(3);
        let mode = RunMode::Continuous {
            interval: Duration::from_millis(1),
        };
        assert_eq!(sampler.run(mode, &running).await, 3);
        assert_eq!(emitted.load(Ordering::SeqCst), 3);
        assert_eq!(
            sampler.devices().devices()[0].rails()[0].power().value(),
            -1.0
        );
    }

    #[tokio::test]
    async fn test_cleared_flag_skips_loops() {
        let (mut sampler, emitted, running) = counting_sampler(u64::MAX);
        running.store(false, Ordering::SeqCst);
        let mode = RunMode::Continuous {
            interval: Duration::from_millis(1),
        };
        assert_eq!(sampler.run(mode, &running).await, 0);
        assert_eq!(emitted.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_from_config_rejects_empty_devices() {
        let empty: [&str; 0] = [];
        let config = SamplerConfig::default().with_device_paths(empty);
        assert!(Sampler::from_config(&config).is_err());
    }
}
