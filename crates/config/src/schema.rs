use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure parsed from `dash.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Sampling cadence and retention shared by every collector.
    pub global: GlobalConfig,
    /// Chart canvas settings.
    pub render: RenderConfig,
    /// Periodic PNG export of every plot.
    pub export: ExportConfig,
    /// Colours and fonts.
    pub theme: ThemeConfig,
    pub temperature: TemperatureConfig,
    pub network: NetworkConfig,
    pub disk: DiskConfig,
}

/// Sampling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Collector tick interval in milliseconds.
    pub sample_interval_ms: u64,
    /// Points retained per series; older points are evicted first.
    pub capacity: usize,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 1_000,
            // Twelve hours at one sample per second.
            capacity: 12 * 3600,
        }
    }
}

/// Raster canvas dimensions in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width:  u32,
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { width: 800, height: 240 }
    }
}

/// Where and how often rendered charts are written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub interval_secs: u64,
    /// Window passed to every render: `-1` (or `0`) = all retained points.
    pub window: i64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("/var/lib/dash"),
            interval_secs: 60,
            window: -1,
        }
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Canvas background (hex, e.g. `"#ffffff"`).
    pub background: String,
    /// Chart title colour.
    pub title_color: String,
    /// Title font size in points.
    pub title_font_size: u32,
    /// `strftime` format for time-axis labels.
    pub time_format: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background:      "#ffffff".to_string(),
            title_color:     "#2c2c90".to_string(),
            title_font_size: 14,
            time_format:     "%H:%M:%S".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureConfig {
    /// sysfs file holding the CPU temperature in millidegrees Celsius.
    pub thermal_zone: PathBuf,
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        Self {
            thermal_zone: PathBuf::from("/sys/class/thermal/thermal_zone0/temp"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Interface whose rx/tx counters are plotted.
    pub interface: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { interface: "eth0".to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskConfig {
    /// Exactly three mount points share the disk-usage chart.
    pub mounts: [MountConfig; 3],
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            mounts: [
                MountConfig::new("data", "/data"),
                MountConfig::new("root", "/"),
                MountConfig::new("boot", "/boot"),
            ],
        }
    }
}

/// One filesystem on the disk-usage chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MountConfig {
    /// Legend label.
    pub label: String,
    pub path: PathBuf,
}

impl MountConfig {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}
