//! # Rail Probe - INA3221 power-rail telemetry
//!
//! Samples the voltage, current and power rails exposed by INA3221 hardware
//! monitors (as found on the Jetson TX2) through their IIO sysfs attributes,
//! and prints each sample or appends it to a CSV file.
//!
//! ## Features
//!
//! - **Fixed topology**: devices → rails → measurement points, built once
//! - **Failure tolerant**: unreadable sensors read as `-1.0`, unnamed rails stay empty
//! - **Append-friendly CSV**: header written only when the file is new
//! - **Library + Binary**: Use as a crate or standalone application
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rail_probe::{create_device_set, print_values, write_row};
//! use std::path::Path;
//!
//! let mut devices = create_device_set();
//! print_values(&mut devices);
//! write_row(Path::new("power.csv"), &mut devices, &[("mode", "idle")]);
//! ```

pub mod error;
pub mod metrics;
pub mod sampler;
pub mod sink;

// Re-export public API
pub use error::{MonitorError, Result};
pub use metrics::{
    create_device_set, Device, DeviceSet, MeasurementKind, MeasurementPoint, Rail, Sample,
    DEFAULT_DEVICE_PATHS, RAILS_PER_DEVICE, SENTINEL,
};
pub use sampler::{RunMode, Sampler, SamplerConfig};
pub use sink::{
    print_values, write_plain_row, write_row, write_row_with_comment, ConsoleSink, CsvSink,
    OutputFormat, Sink,
};

/// The default sample interval in milliseconds (single shot)
pub const DEFAULT_INTERVAL_MS: u64 = 0;

/// Interval above which sampling is recommended, in milliseconds
pub const RECOMMENDED_MIN_INTERVAL_MS: u64 = 1000;
