//! Power-rail measurement hierarchy.
//!
//! A [`DeviceSet`] owns a fixed list of [`Device`]s, each device owns
//! [`RAILS_PER_DEVICE`] [`Rail`]s and each rail owns three
//! [`MeasurementPoint`]s backed by sysfs attributes of an INA3221 IIO
//! device. The topology is built once; sampling only refreshes values.

pub mod data;
pub mod device;
pub mod point;
pub mod rail;

// Re-export commonly used items
pub use data::{DeviceReading, RailReading, Sample};
pub use device::{create_device_set, Device, DeviceSet, DEFAULT_DEVICE_PATHS, RAILS_PER_DEVICE};
pub use point::{MeasurementKind, MeasurementPoint, SENTINEL};
pub use rail::Rail;
