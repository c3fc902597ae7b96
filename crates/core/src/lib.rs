pub mod error;
pub mod series;
pub mod state;

pub use error::{DashError, Result};
pub use series::{Datapoint, TimeSeries};
pub use state::{PlotSummary, SeriesSummary};
