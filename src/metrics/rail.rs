//! A named power rail: voltage, current and power sampled together.

use crate::error::read_sysfs_token;
use crate::metrics::point::{MeasurementKind, MeasurementPoint};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Render a sample the way `%f` does: six fractional digits, no exponent.
pub(crate) fn format_value(value: f64) -> String {
    format!("{:.6}", value)
}

/// One power-delivery channel of a monitor chip.
#[derive(Debug, Clone)]
pub struct Rail {
    index: usize,
    name: String,
    voltage: MeasurementPoint,
    current: MeasurementPoint,
    power: MeasurementPoint,
}

impl Rail {
    /// Discover rail `index` under `base`. The name is read once from
    /// `rail_name_<index>` and left empty when that file is unreadable.
    pub fn new(base: &Path, index: usize) -> Self {
        let name_path = base.join(format!("rail_name_{}", index));
        let name = read_sysfs_token(&name_path).unwrap_or_else(|err| {
            debug!("Rail {} has no name: {}", index, err);
            String::new()
        });

        Self {
            index,
            name,
            voltage: MeasurementPoint::new(base, index, MeasurementKind::Voltage),
            current: MeasurementPoint::new(base, index, MeasurementKind::Current),
            power: MeasurementPoint::new(base, index, MeasurementKind::Power),
        }
    }

    /// Refresh voltage, current and power, in that order. A failing point
    /// does not stop the others from being read.
    pub fn refresh(&mut self) {
        self.voltage.refresh();
        self.current.refresh();
        self.power.refresh();
    }

    /// `"<voltage>,<current>,<power>"` from the last refresh.
    pub fn to_csv_segment(&self) -> String {
        self.points()
            .iter()
            .map(|point| format_value(point.value()))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// `"<name> voltage,<name> current,<name> power"`.
    pub fn csv_header_segment(&self) -> String {
        MeasurementKind::ALL
            .iter()
            .map(|kind| format!("{} {}", self.name, kind))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn voltage(&self) -> &MeasurementPoint {
        &self.voltage
    }

    pub fn current(&self) -> &MeasurementPoint {
        &self.current
    }

    pub fn power(&self) -> &MeasurementPoint {
        &self.power
    }

    fn points(&self) -> [&MeasurementPoint; 3] {
        [&self.voltage, &self.current, &self.power]
    }
}

impl fmt::Display for Rail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "name:{}", self.name)?;
        writeln!(f, "    voltage:{}", self.voltage)?;
        writeln!(f, "    current:{}", self.current)?;
        write!(f, "    power:{}", self.power)
    }
}
