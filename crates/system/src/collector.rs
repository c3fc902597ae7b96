use crate::MetricProvider;
use chrono::{DateTime, Local};
use dash_core::TimeSeries;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

/// How raw provider readings become plotted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transform {
    /// Push readings as-is.
    #[default]
    Identity,
    /// Treat readings as monotonic counters and push the per-second rate
    /// `(raw[i] - raw[i-1]) / elapsed` between consecutive samples.
    ///
    /// The first tick only records a baseline and pushes nothing.  A counter
    /// that goes backwards (interface reset) also pushes nothing and becomes
    /// the new baseline.
    Rate,
}

/// Destination of a collector's readings: one value per series, all stamped
/// with the same instant.
pub trait PointSink<const N: usize>: Send {
    fn add_point(&self, timestamp: DateTime<Local>, values: [f64; N]);
}

impl<const N: usize> PointSink<N> for [Arc<TimeSeries>; N] {
    fn add_point(&self, timestamp: DateTime<Local>, values: [f64; N]) {
        for (series, value) in self.iter().zip(values) {
            series.push(timestamp, value);
        }
    }
}

/// Periodic sampler bound to one provider and the `N` series it feeds.
///
/// The collector is the only writer of its target series.
pub struct Collector<P, const N: usize> {
    name:      String,
    provider:  P,
    interval:  Duration,
    transform: Transform,
    targets:   Box<dyn PointSink<N>>,
    /// Previous raw reading and when it was taken, used by [`Transform::Rate`].
    previous:  Option<([f64; N], DateTime<Local>)>,
    last_push: Option<DateTime<Local>>,
    failing:   bool,
}

impl<P: MetricProvider<N>, const N: usize> Collector<P, N> {
    pub fn new(
        name: impl Into<String>,
        provider: P,
        interval: Duration,
        targets: impl PointSink<N> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            provider,
            interval,
            transform: Transform::Identity,
            targets: Box::new(targets),
            previous: None,
            last_push: None,
            failing: false,
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run one sampling step at `now`.
    ///
    /// Returns the values pushed, or `None` when the tick was skipped because
    /// the provider failed or the transform had nothing to emit yet.
    pub fn tick(&mut self, now: DateTime<Local>) -> Option<[f64; N]> {
        let raw = match self.provider.sample() {
            Ok(raw) => {
                if self.failing {
                    info!(collector = %self.name, "provider recovered");
                    self.failing = false;
                }
                raw
            }
            Err(e) => {
                if self.failing {
                    debug!(collector = %self.name, "still failing: {e}");
                } else {
                    warn!(collector = %self.name, "sample failed, skipping tick: {e}");
                    self.failing = true;
                }
                return None;
            }
        };

        // A wall clock stepping backwards must not break per-series ordering.
        let at = self.last_push.map_or(now, |last| now.max(last));
        let values = self.apply(raw, at)?;

        self.targets.add_point(at, values);
        self.last_push = Some(at);

        Some(values)
    }

    fn apply(&mut self, raw: [f64; N], at: DateTime<Local>) -> Option<[f64; N]> {
        match self.transform {
            Transform::Identity => Some(raw),
            Transform::Rate => {
                let (previous, since) = self.previous.replace((raw, at))?;

                // Skipped ticks widen the gap; divide by the time actually elapsed.
                let elapsed = (at - since).num_milliseconds() as f64 / 1000.0;
                let secs = if elapsed > 0.0 { elapsed } else { self.interval.as_secs_f64() };

                let mut rates = [0.0; N];
                for ((rate, now), before) in rates.iter_mut().zip(raw).zip(previous) {
                    let delta = now - before;
                    if delta < 0.0 {
                        debug!(collector = %self.name, "counter went backwards; re-baselining");
                        return None;
                    }
                    *rate = delta / secs;
                }
                Some(rates)
            }
        }
    }

    /// Tick every `interval` until `shutdown` flips to `true` (or its sender
    /// is dropped).  A tick that has started always finishes its pushes.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(collector = %self.name, interval = ?self.interval, "collector started");

        loop {
            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.tick(Local::now());
                }
            }
        }

        info!(collector = %self.name, "collector stopped");
    }
}
