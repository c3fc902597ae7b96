pub mod schema;

pub use schema::{
    DashConfig, DiskConfig, ExportConfig, GlobalConfig, MountConfig, NetworkConfig, RenderConfig,
    TemperatureConfig, ThemeConfig,
};

use dash_core::{DashError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Load configuration from a TOML file.  Returns `DashConfig::default()` if
/// the file doesn't exist so the dashboard always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<DashConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(DashConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| DashError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse configuration from TOML text.
pub fn parse(raw: &str) -> Result<DashConfig> {
    toml::from_str(raw).map_err(|e| DashError::Config(format!("TOML parse error: {e}")))
}

/// Return the config path: `$DASH_CONFIG` if set, otherwise
/// `$XDG_CONFIG_HOME/dash/dash.toml`.
pub fn default_path() -> PathBuf {
    if let Ok(explicit) = std::env::var("DASH_CONFIG") {
        return PathBuf::from(explicit);
    }

    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("dash").join("dash.toml")
}

impl DashConfig {
    /// Reject settings that would make the dashboard unable to run.
    /// Colours are checked when the theme is compiled.
    pub fn validate(&self) -> Result<()> {
        if self.global.capacity == 0 {
            return Err(DashError::Config("global.capacity must be at least 1".into()));
        }
        if self.global.sample_interval_ms == 0 {
            return Err(DashError::Config("global.sample_interval_ms must be positive".into()));
        }
        if self.render.width == 0 || self.render.height == 0 {
            return Err(DashError::Config(format!(
                "render canvas {}x{} has a zero dimension",
                self.render.width, self.render.height
            )));
        }
        if self.export.interval_secs == 0 {
            return Err(DashError::Config("export.interval_secs must be positive".into()));
        }
        if self.network.interface.trim().is_empty() {
            return Err(DashError::Config("network.interface is empty".into()));
        }
        Ok(())
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.global.sample_interval_ms)
    }
}

impl ExportConfig {
    /// Delay between export passes.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}
