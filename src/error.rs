use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Raised by the scale builder when a dataset has no usable records.
    #[error("dataset is empty")]
    EmptyDataset,

    #[error("invalid record at position {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("record index {index} is out of range for a series of {len} records")]
    OutOfRangeIndex { index: usize, len: usize },
}
