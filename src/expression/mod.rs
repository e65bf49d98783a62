pub mod stream_expression;
pub use stream_expression::*;

pub mod expression_parser;
pub use expression_parser::*;

pub mod parse_error;
pub use parse_error::*;
