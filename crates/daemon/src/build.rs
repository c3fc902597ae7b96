use dash_config::DashConfig;
use dash_core::{Result, TimeSeries};
use dash_renderer::{Canvas, Lines, Plot, PlotCatalog, Unit, YAxis};
use dash_system::{
    Collector, CpuTemperature, DiskUsage, LoadAverage, MemoryUsage, MetricProvider,
    NetworkCounters, Transform,
};
use dash_theme::{style, Theme};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;

const PERCENT: YAxis = YAxis::Fixed { min: 0.0, max: 100.0 };

/// Collects plots while spawning the collector that feeds each one.
struct Wiring<'a> {
    interval: Duration,
    capacity: usize,
    shutdown: &'a watch::Receiver<bool>,
    tasks:    &'a mut JoinSet<()>,
    plots:    Vec<(String, Plot)>,
}

impl Wiring<'_> {
    fn series<const N: usize>(&self, names: [&str; N]) -> [Arc<TimeSeries>; N] {
        names.map(|name| Arc::new(TimeSeries::new(name, self.capacity)))
    }

    fn add<P, const N: usize>(&mut self, name: &str, lines: Lines<N>, provider: P, transform: Transform)
    where
        P: MetricProvider<N> + 'static,
        Plot: From<Lines<N>>,
    {
        let collector = Collector::new(name, provider, self.interval, lines.clone())
            .with_transform(transform);
        self.tasks.spawn(collector.run(self.shutdown.clone()));
        self.plots.push((name.to_string(), Plot::from(lines)));
    }
}

/// Create every series, register the plots that read them and spawn the
/// collectors that write them onto `tasks`.
///
/// Must be called from within a Tokio runtime.  Collectors stop once
/// `shutdown` turns `true`.
pub fn build(
    config: &DashConfig,
    theme: Theme,
    shutdown: &watch::Receiver<bool>,
    tasks: &mut JoinSet<()>,
) -> Result<PlotCatalog> {
    let mut w = Wiring {
        interval: config.sample_interval(),
        capacity: config.global.capacity,
        shutdown,
        tasks,
        plots: Vec::with_capacity(5),
    };

    let temp = Lines::new("CPU Temperature", w.series(["cpuTemp"]), [style::CPU_TEMP])
        .y_axis(PERCENT)
        .unit(Unit::Celsius);
    w.add(
        "cpuTemp",
        temp,
        CpuTemperature::new(&config.temperature.thermal_zone),
        Transform::Identity,
    );

    let iface = &config.network.interface;
    let (rx, tx) = (format!("{iface} Rx"), format!("{iface} Tx"));
    let network = Lines::new(
        "Network",
        w.series([rx.as_str(), tx.as_str()]),
        [style::NET_RX, style::NET_TX],
    )
    .unit(Unit::BytesPerSecond);
    w.add("network", network, NetworkCounters::new(iface), Transform::Rate);

    let load = Lines::new(
        "Load Average",
        w.series(["Avg1", "Avg5", "Avg15"]),
        [style::LOAD_1, style::LOAD_5, style::LOAD_15],
    );
    w.add("loadAvg", load, LoadAverage, Transform::Identity);

    let memory = Lines::new("Memory Usage", w.series(["used"]), [style::MEMORY])
        .y_axis(PERCENT)
        .unit(Unit::Percent);
    w.add("memoryUsage", memory, MemoryUsage::new(), Transform::Identity);

    let mounts = &config.disk.mounts;
    let disk = Lines::new(
        "Disk Usage",
        w.series(mounts.each_ref().map(|m| m.label.as_str())),
        [style::DISK_DATA, style::DISK_ROOT, style::DISK_BOOT],
    )
    .y_axis(PERCENT)
    .unit(Unit::Percent);
    let paths = mounts.each_ref().map(|m| m.path.clone());
    w.add("diskUsage", disk, DiskUsage::new(paths), Transform::Identity);

    PlotCatalog::new(w.plots, Canvas::from_config(&config.render), theme)
}
