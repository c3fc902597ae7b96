use crate::MetricProvider;
use dash_core::{DashError, Result};
use std::path::PathBuf;
use std::process::Command;

/// CPU temperature in °C.
///
/// Reads a sysfs thermal zone first and falls back to `vcgencmd measure_temp`
/// on Raspberry Pi firmware that doesn't expose one.
#[derive(Debug, Clone)]
pub struct CpuTemperature {
    thermal_zone: PathBuf,
}

impl CpuTemperature {
    pub fn new(thermal_zone: impl Into<PathBuf>) -> Self {
        Self { thermal_zone: thermal_zone.into() }
    }

    fn from_vcgencmd() -> Result<f64> {
        let out = Command::new("vcgencmd")
            .arg("measure_temp")
            .output()
            .map_err(|e| DashError::Provider(format!("vcgencmd: {e}")))?;
        if !out.status.success() {
            return Err(DashError::Provider(format!("vcgencmd exited with {}", out.status)));
        }
        parse_vcgencmd(&String::from_utf8_lossy(&out.stdout))
    }
}

impl MetricProvider<1> for CpuTemperature {
    fn sample(&mut self) -> Result<[f64; 1]> {
        let celsius = match std::fs::read_to_string(&self.thermal_zone) {
            Ok(raw) => parse_millidegrees(&raw)?,
            Err(e) => {
                tracing::trace!("{}: {e}; trying vcgencmd", self.thermal_zone.display());
                Self::from_vcgencmd()?
            }
        };
        Ok([celsius])
    }
}

/// Parse sysfs thermal output, e.g. `"48312\n"` → `48.312`.
pub fn parse_millidegrees(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map(|m| m / 1000.0)
        .map_err(|e| DashError::Provider(format!("cannot parse thermal zone '{}': {e}", raw.trim())))
}

/// Parse `vcgencmd measure_temp` output, e.g. `"temp=48.3'C\n"` → `48.3`.
pub fn parse_vcgencmd(raw: &str) -> Result<f64> {
    let (_, value) = raw
        .trim()
        .split_once('=')
        .ok_or_else(|| DashError::Provider(format!("cannot parse vcgencmd output: {raw}")))?;

    let digits: String = value
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    digits
        .parse::<f64>()
        .map_err(|e| DashError::Provider(format!("cannot convert temperature '{value}': {e}")))
}
