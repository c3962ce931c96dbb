#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("No calibration known for map {0:?}")]
    UnknownMap(String),
    #[error("Event #{event_index} has a non-finite {field}")]
    NonFinitePosition {
        event_index: usize,
        field: &'static str,
    },
    #[error("Cannot render a heatmap without any points")]
    EmptyPointSeries,
}
