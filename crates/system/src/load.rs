use crate::MetricProvider;
use dash_core::Result;
use sysinfo::System;

/// 1, 5 and 15 minute load averages.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoadAverage;

impl MetricProvider<3> for LoadAverage {
    fn sample(&mut self) -> Result<[f64; 3]> {
        let load = System::load_average();
        Ok([load.one, load.five, load.fifteen])
    }
}
