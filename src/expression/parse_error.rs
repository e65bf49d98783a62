use thiserror::Error;

use crate::expression::ExpressionParser;

/// Where and why an expression failed to parse.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message} at [{start}:{end}] -> '{text}'")]
pub struct ParseError {
    pub message: String,
    /// Text from `start` up to and including the character at `end`.
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl ParseError {
    pub fn at(message: &str, pivot: usize, parser: &ExpressionParser) -> Self {
        Self {
            message: message.to_string(),
            text: parser.text_from_range(pivot, parser.position + 1),
            start: pivot,
            end: parser.position,
        }
    }

    pub fn err<T>(self) -> Result<T, ParseError> {
        Err(self)
    }
}
