use std::fmt;

use crate::{
    expression::StreamExpression,
    factory::ExpressionBuilder,
    metrics::{Explanation, MetricValue},
    tuple::Tuple,
};

/// A running aggregate over a stream of tuples.
///
/// The pipeline stage that owns a metric will:
///   1) call `update` once per incoming tuple
///   2) read `value` at end of stream (or whenever it needs a snapshot)
///   3) call `new_instance` to get a fresh accumulator per partition
///
/// `update` never fails: absent or non-numeric fields are skipped.
pub trait Metric: Send + fmt::Debug {
    /// Function name as authored, e.g. `"sum"`.
    fn function_name(&self) -> &str;

    /// Display form, e.g. `"sum(price)"`.
    fn identifier(&self) -> &str;

    /// Fields this metric reads, in order.
    fn columns(&self) -> &[String];

    fn update(&mut self, tuple: &Tuple);

    fn value(&self) -> MetricValue;

    /// Same function and columns, state reset.
    fn new_instance(&self) -> Box<dyn Metric>;

    fn to_expression(&self, builder: &dyn ExpressionBuilder) -> StreamExpression;

    fn explain(&self, builder: &dyn ExpressionBuilder) -> Explanation {
        Explanation {
            function_name: self.function_name().to_string(),
            implementing_type: std::any::type_name::<Self>().to_string(),
            expression_type: "metric",
            expression: self.to_expression(builder).to_string(),
        }
    }
}
