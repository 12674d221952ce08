//! Serializable copies of sampled values.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// All rail readings of one sampling round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// Local wall-clock time the sample was taken
    pub timestamp: DateTime<Local>,
    /// One entry per device, in device set order
    pub devices: Vec<DeviceReading>,
}

/// Readings of one monitor chip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceReading {
    /// IIO directory of the device
    pub path: String,
    /// One entry per rail, in rail index order
    pub rails: Vec<RailReading>,
}

/// Readings of one rail. Unreadable sensors carry the -1.0 sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailReading {
    /// Rail label, empty when the name file is missing
    pub name: String,
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
}

impl Default for RailReading {
    fn default() -> Self {
        Self {
            name: String::new(),
            voltage: 0.0,
            current: 0.0,
            power: 0.0,
        }
    }
}
