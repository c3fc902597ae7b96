use crate::MetricProvider;
use dash_core::{DashError, Result};
use sysinfo::System;

/// Used RAM as a percentage of total.
pub struct MemoryUsage {
    sys: System,
}

impl MemoryUsage {
    pub fn new() -> Self {
        Self { sys: System::new() }
    }
}

impl Default for MemoryUsage {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricProvider<1> for MemoryUsage {
    fn sample(&mut self) -> Result<[f64; 1]> {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(DashError::Provider("total memory reported as zero".into()));
        }
        Ok([percent(self.sys.used_memory(), total)])
    }
}

/// `part / whole` as a percentage; callers guarantee `whole > 0`.
pub(crate) fn percent(part: u64, whole: u64) -> f64 {
    part as f64 * 100.0 / whole as f64
}

/// Format a byte count as a human-readable string (e.g. `"7.3 GiB"`).
pub fn format_bytes(bytes: u64) -> String {
    const GIB: u64 = 1 << 30;
    const MIB: u64 = 1 << 20;
    const KIB: u64 = 1 << 10;

    if bytes >= GIB {
        format!("{:.1} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_gib() {
        assert_eq!(format_bytes(8 * 1024 * 1024 * 1024), "8.0 GiB");
    }

    #[test]
    fn format_bytes_mib() {
        assert_eq!(format_bytes(512 * 1024 * 1024), "512.0 MiB");
    }

    #[test]
    fn format_bytes_zero() {
        assert_eq!(format_bytes(0), "0 B");
    }

    #[test]
    fn percent_of_whole() {
        assert_eq!(percent(1, 4), 25.0);
        assert_eq!(percent(4, 4), 100.0);
    }
}
