use crate::expression::StreamExpression;

/// Pulls positional plain-value operands out of an expression.
pub trait ValueOperands {
    /// The `index`-th plain value operand; named operands and nested calls
    /// are not counted.
    fn value_operand(&self, expression: &StreamExpression, index: usize) -> Option<String>;
}

/// Builds new expression nodes.
pub trait ExpressionBuilder {
    fn function_expression(&self, function_name: &str) -> StreamExpression;
}
