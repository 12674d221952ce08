//! Monitor chips and the fixed set of them sampled by the process.

use crate::metrics::data::{DeviceReading, RailReading, Sample};
use crate::metrics::rail::Rail;
use chrono::Local;
use std::fmt;
use std::path::{Path, PathBuf};

/// Rails exposed by one INA3221 monitor. Every device contributes
/// `3 * RAILS_PER_DEVICE` CSV columns.
pub const RAILS_PER_DEVICE: usize = 3;

/// IIO directories of the Jetson TX2 power monitors, in CSV column order.
///
/// Reordering these invalidates CSV files written by earlier runs.
pub const DEFAULT_DEVICE_PATHS: [&str; 2] = [
    "/sys/devices/3160000.i2c/i2c-0/0-0040/iio_device",
    "/sys/devices/3160000.i2c/i2c-0/0-0041/iio_device",
];

/// One hardware power monitor with a fixed, ordered list of rails.
#[derive(Debug, Clone)]
pub struct Device {
    path: PathBuf,
    rails: Vec<Rail>,
}

impl Device {
    /// Discover rails `0..RAILS_PER_DEVICE` under `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let rails = (0..RAILS_PER_DEVICE)
            .map(|index| Rail::new(&path, index))
            .collect();
        Self { path, rails }
    }

    /// Refresh every rail in index order.
    pub fn refresh(&mut self) {
        for rail in &mut self.rails {
            rail.refresh();
        }
    }

    pub fn to_csv_segment(&self) -> String {
        self.rails
            .iter()
            .map(Rail::to_csv_segment)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn csv_header_segment(&self) -> String {
        self.rails
            .iter()
            .map(Rail::csv_header_segment)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn rails(&self) -> &[Rail] {
        &self.rails
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn reading(&self) -> DeviceReading {
        DeviceReading {
            path: self.path.display().to_string(),
            rails: self
                .rails
                .iter()
                .map(|rail| RailReading {
                    name: rail.name().to_string(),
                    voltage: rail.voltage().value(),
                    current: rail.current().value(),
                    power: rail.power().value(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rails:")?;
        for rail in &self.rails {
            write!(f, "\n{}", rail)?;
        }
        Ok(())
    }
}

/// Every device the process monitors. The topology is fixed once built;
/// only the sampled values change.
#[derive(Debug, Clone)]
pub struct DeviceSet {
    devices: Vec<Device>,
}

impl DeviceSet {
    /// Build devices from explicit base paths, in the given order.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            devices: paths.into_iter().map(Device::new).collect(),
        }
    }

    /// One sampling round: every device, rail and point, sequentially.
    pub fn refresh(&mut self) {
        for device in &mut self.devices {
            device.refresh();
        }
    }

    /// Measurement header cells, without the leading `date,time`.
    pub fn csv_header(&self) -> String {
        self.devices
            .iter()
            .map(Device::csv_header_segment)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Measurement values of the last refresh, without the timestamp.
    pub fn to_csv_segment(&self) -> String {
        self.devices
            .iter()
            .map(Device::to_csv_segment)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Serializable copy of the current values.
    pub fn snapshot(&self) -> Sample {
        Sample {
            timestamp: Local::now(),
            devices: self.devices.iter().map(Device::reading).collect(),
        }
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

/// Build the device set from [`DEFAULT_DEVICE_PATHS`].
pub fn create_device_set() -> DeviceSet {
    DeviceSet::from_paths(DEFAULT_DEVICE_PATHS)
}
