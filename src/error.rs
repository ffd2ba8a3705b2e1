use thiserror::Error;

use crate::core::Granularity;

pub type GanttResult<T> = Result<T, GanttError>;

#[derive(Debug, Error)]
pub enum GanttError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid date `{input}`: {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("granularity `{granularity}` is not supported in {mode} row mode")]
    UnsupportedGranularity {
        granularity: Granularity,
        mode: &'static str,
    },
}
