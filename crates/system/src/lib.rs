//! Metric providers and the collectors that sample them on a fixed cadence.

pub mod collector;
pub mod disk;
pub mod load;
pub mod memory;
pub mod network;
pub mod temperature;

pub use collector::{Collector, PointSink, Transform};
pub use disk::DiskUsage;
pub use load::LoadAverage;
pub use memory::{format_bytes, MemoryUsage};
pub use network::NetworkCounters;
pub use temperature::CpuTemperature;

use dash_core::Result;

/// A source of `N` related readings per call (e.g. three load averages).
///
/// Providers are owned by exactly one [`Collector`], so `sample` may keep
/// refresh state behind `&mut self`.
pub trait MetricProvider<const N: usize>: Send {
    fn sample(&mut self) -> Result<[f64; N]>;
}

/// Adapts a closure into a [`MetricProvider`].
pub struct FnProvider<F>(pub F);

impl<F, const N: usize> MetricProvider<N> for FnProvider<F>
where
    F: FnMut() -> Result<[f64; N]> + Send,
{
    fn sample(&mut self) -> Result<[f64; N]> {
        (self.0)()
    }
}
