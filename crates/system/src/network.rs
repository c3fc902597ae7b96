use crate::MetricProvider;
use dash_core::{DashError, Result};
use sysinfo::Networks;

/// Cumulative received / transmitted byte counters of one interface.
///
/// The values only ever grow; pair with [`Transform::Rate`](crate::Transform::Rate)
/// to chart bytes per second.
pub struct NetworkCounters {
    interface: String,
    networks:  Networks,
}

impl NetworkCounters {
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            networks:  Networks::new_with_refreshed_list(),
        }
    }
}

impl MetricProvider<2> for NetworkCounters {
    fn sample(&mut self) -> Result<[f64; 2]> {
        self.networks.refresh(false); // false = keep existing interfaces list

        let (_, data) = self
            .networks
            .iter()
            .find(|(name, _)| name.as_str() == self.interface)
            .ok_or_else(|| DashError::Provider(format!("interface '{}' not found", self.interface)))?;

        Ok([data.total_received() as f64, data.total_transmitted() as f64])
    }
}
