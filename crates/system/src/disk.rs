use crate::memory::percent;
use crate::MetricProvider;
use dash_core::{DashError, Result};
use std::path::PathBuf;
use sysinfo::Disks;

/// Used space of three mount points, each as a percentage of its size.
#[derive(Debug, Clone)]
pub struct DiskUsage {
    mounts: [PathBuf; 3],
}

impl DiskUsage {
    pub fn new(mounts: [PathBuf; 3]) -> Self {
        Self { mounts }
    }
}

impl MetricProvider<3> for DiskUsage {
    fn sample(&mut self) -> Result<[f64; 3]> {
        let disks = Disks::new_with_refreshed_list();

        let mut usage = [0.0; 3];
        for (slot, mount) in usage.iter_mut().zip(&self.mounts) {
            let disk = disks
                .iter()
                .find(|d| d.mount_point() == mount.as_path())
                .ok_or_else(|| {
                    DashError::Provider(format!("no filesystem mounted at '{}'", mount.display()))
                })?;

            let total = disk.total_space();
            if total == 0 {
                return Err(DashError::Provider(format!(
                    "filesystem at '{}' reports zero size",
                    mount.display()
                )));
            }
            *slot = percent(total.saturating_sub(disk.available_space()), total);
        }
        Ok(usage)
    }
}
