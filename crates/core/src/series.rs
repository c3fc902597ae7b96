use crate::state::SeriesSummary;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// One `(timestamp, value)` sample.  Immutable once pushed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datapoint {
    pub timestamp: DateTime<Local>,
    pub value:     f64,
}

impl Datapoint {
    pub fn new(timestamp: DateTime<Local>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Fixed-capacity, timestamp-ordered ring buffer of [`Datapoint`]s.
///
/// One writer (the owning collector) calls [`push`](Self::push); any number of
/// renderers may read concurrently.  Every read copies the requested window
/// out under a shared lock, so a reader never sees a half-applied eviction.
/// Timestamp ordering is the writer's responsibility.
#[derive(Debug)]
pub struct TimeSeries {
    name:     String,
    capacity: usize,
    points:   RwLock<VecDeque<Datapoint>>,
}

impl TimeSeries {
    /// Create an empty series.  A capacity of zero is raised to one.
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            name: name.into(),
            capacity,
            points: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a sample, evicting exactly the oldest one when full.
    pub fn push(&self, timestamp: DateTime<Local>, value: f64) {
        let mut points = self.write();
        if points.len() == self.capacity {
            points.pop_front();
        }
        points.push_back(Datapoint::new(timestamp, value));
    }

    /// Every retained point, oldest first.  Empty when nothing was pushed yet.
    pub fn all(&self) -> Vec<Datapoint> {
        self.read().iter().copied().collect()
    }

    /// The last `n` points in order.
    ///
    /// `n <= 0` (callers pass `-1` for "all") or `n >= len` returns the full
    /// series.
    pub fn window(&self, n: i64) -> Vec<Datapoint> {
        let points = self.read();
        let len = points.len();
        let skip = match usize::try_from(n) {
            Ok(n) if n > 0 && n < len => len - n,
            _ => 0,
        };
        points.iter().skip(skip).copied().collect()
    }

    /// Oldest retained point, or `None` when the series is empty.
    pub fn earliest(&self) -> Option<Datapoint> {
        self.read().front().copied()
    }

    /// Newest retained point, or `None` when the series is empty.
    pub fn latest(&self) -> Option<Datapoint> {
        self.read().back().copied()
    }

    /// Boundaries and size, read under a single lock.
    pub fn summary(&self) -> SeriesSummary {
        let points = self.read();
        SeriesSummary {
            label:       self.name.clone(),
            points:      points.len(),
            capacity:    self.capacity,
            latest:      points.back().map(|p| p.value),
            earliest_at: points.front().map(|p| p.timestamp),
            latest_at:   points.back().map(|p| p.timestamp),
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Poisoning is ignored: pop_front/push_back never leave the deque torn.
    fn read(&self) -> RwLockReadGuard<'_, VecDeque<Datapoint>> {
        self.points.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, VecDeque<Datapoint>> {
        self.points.write().unwrap_or_else(PoisonError::into_inner)
    }
}
