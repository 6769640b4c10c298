use thiserror::Error;

/// Input rejected at the boundary between a data loader and the flow engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NetworkError {
    #[error("station `{0}` is defined more than once")]
    DuplicateStation(String),

    #[error("segment {from} - {to} references unknown station `{station}`")]
    UnknownStation { from: String, to: String, station: String },

    #[error("segment {from} - {to} has negative capacity {capacity}")]
    NegativeCapacity { from: String, to: String, capacity: i64 },

    #[error("unknown service class `{0}`")]
    UnknownService(String),

    #[error("station name `{0}` is reserved for network reduction")]
    ReservedName(String),

    #[error("segment {from} - {to} has no priced service class")]
    UnpricedService { from: String, to: String },
}
