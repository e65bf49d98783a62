use thiserror::Error;

use crate::expression::ParseError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetricError {
    /// Operand missing, or not a plain value.
    #[error("Invalid expression {expression} - expected {expected}")]
    InvalidExpression { expression: String, expected: String },

    /// More than the single column operand.
    #[error("Invalid expression {expression} - unknown operands found, expected {expected}")]
    UnknownOperands { expression: String, expected: String },

    #[error("Function '{0}' is not a registered metric")]
    FunctionNotFound(String),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Invalid factory configuration: {0}")]
    Config(String),
}

pub type MetricResult<T> = Result<T, MetricError>;
