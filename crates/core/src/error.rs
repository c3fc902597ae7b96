use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum DashError {
    #[error("config error: {0}")]
    Config(String),

    /// A metric provider failed to produce a sample.  Collectors swallow this
    /// at the tick boundary; it never reaches a render caller.
    #[error("provider error: {0}")]
    Provider(String),

    #[error("plot not found: {0}")]
    NotFound(String),

    #[error("series '{0}' has no datapoints")]
    EmptySeries(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl DashError {
    /// `true` for errors a request layer should report as "not found";
    /// everything else is an internal error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T, E = DashError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_not_found_maps_to_not_found() {
        assert!(DashError::NotFound("bogus".into()).is_not_found());
        assert!(!DashError::EmptySeries("cpuTemp".into()).is_not_found());
        assert!(!DashError::Encoding("png".into()).is_not_found());
    }

    #[test]
    fn empty_series_message_names_the_series() {
        let err = DashError::EmptySeries("eth0 Rx".into());
        assert_eq!(err.to_string(), "series 'eth0 Rx' has no datapoints");
    }
}
