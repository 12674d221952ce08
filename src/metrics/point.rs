//! A single scalar sensor reading backed by a sysfs attribute.

use crate::error::{read_sysfs_token, MonitorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Value stored when a sensor file is missing or unparsable.
///
/// A legitimate reading of -1.0 cannot be told apart from a failed read.
/// CSV consumers treat -1.0 as "absent", so the ambiguity is kept.
pub const SENTINEL: f64 = -1.0;

/// The quantity a measurement point reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementKind {
    Voltage,
    Current,
    Power,
}

impl MeasurementKind {
    /// All kinds in the order a rail refreshes and renders them.
    pub const ALL: [MeasurementKind; 3] = [Self::Voltage, Self::Current, Self::Power];

    /// Lowercase name used in headers and console output.
    pub fn name(self) -> &'static str {
        match self {
            Self::Voltage => "voltage",
            Self::Current => "current",
            Self::Power => "power",
        }
    }

    /// sysfs attribute name for rail `index`, e.g. `in_voltage0_input`.
    pub fn attribute(self, index: usize) -> String {
        format!("in_{}{}_input", self.name(), index)
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One sensor value of a rail.
#[derive(Debug, Clone)]
pub struct MeasurementPoint {
    kind: MeasurementKind,
    source: PathBuf,
    value: f64,
}

impl MeasurementPoint {
    /// Create a point for rail `index` under the device directory `base`.
    pub fn new(base: &Path, index: usize, kind: MeasurementKind) -> Self {
        Self {
            kind,
            source: base.join(kind.attribute(index)),
            value: 0.0,
        }
    }

    /// Re-read the sensor. Failures are absorbed into [`SENTINEL`].
    pub fn refresh(&mut self) {
        self.value = match self.read() {
            Ok(value) => value,
            Err(err) => {
                debug!("{} reading unavailable: {}", self.kind, err);
                SENTINEL
            }
        };
    }

    fn read(&self) -> Result<f64> {
        let token = read_sysfs_token(&self.source)?;
        token.parse::<f64>().map_err(|_| {
            MonitorError::parse_error(&self.source, format!("expected a number, got '{token}'"))
        })
    }

    /// Last sampled value, 0.0 before the first refresh.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn kind(&self) -> MeasurementKind {
        self.kind
    }

    /// Path of the sysfs attribute backing this point.
    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl fmt::Display for MeasurementPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name:{}, path:{}, value:{}",
            self.kind,
            self.source.display(),
            self.value
        )
    }
}
