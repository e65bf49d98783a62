use std::fmt;

use tracing::debug;

use crate::{
    expression::StreamExpression,
    factory::{ExpressionBuilder, ValueOperands},
    metrics::{MetricError, MetricResult},
};

/// The immutable part of every metric: function name, identifier and columns.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricIdentity {
    function_name: String,
    identifier: String,
    columns: Vec<String>,
}

impl MetricIdentity {
    pub fn new(function_name: &str, column: &str) -> Self {
        Self {
            function_name: function_name.to_string(),
            identifier: format!("{}({})", function_name, column),
            columns: vec![column.to_string()],
        }
    }

    /// Accepts exactly `name(columnName)`.
    pub fn from_expression(expression: &StreamExpression, operands: &dyn ValueOperands) -> MetricResult<Self> {
        let function_name = &expression.function_name;
        let expected = format!("{}(columnName)", function_name);

        let Some(column) = operands.value_operand(expression, 0) else {
            return Err(MetricError::InvalidExpression { expression: expression.to_string(), expected });
        };
        if expression.parameters.len() != 1 {
            return Err(MetricError::UnknownOperands { expression: expression.to_string(), expected });
        }

        debug!(function = %function_name, column = %column, "metric built from expression");
        Ok(Self::new(function_name, &column))
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column(&self) -> &str {
        &self.columns[0]
    }

    pub fn to_expression(&self, builder: &dyn ExpressionBuilder) -> StreamExpression {
        self.columns
            .iter()
            .fold(builder.function_expression(&self.function_name), |expr, column| {
                expr.with_parameter(column.as_str())
            })
    }
}

impl fmt::Display for MetricIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)
    }
}
