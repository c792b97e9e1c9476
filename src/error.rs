// Error types shared across the plotting pipeline.
//
// Runtime math problems (division by zero, log of zero) are not errors -
// they propagate through the field as IEEE inf/nan and end up as defined
// pixel colours. Only a bad expression or bad plot parameters fail.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    #[error("invalid expression: {0}")]
    InvalidExpression(String),
    #[error("invalid plot parameters: {0}")]
    InvalidSpec(String),
}

pub type PlotResult<T> = Result<T, PlotError>;
