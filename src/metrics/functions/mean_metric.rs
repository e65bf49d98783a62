use tracing::trace;

use crate::{
    expression::StreamExpression,
    factory::{ExpressionBuilder, ValueOperands},
    metrics::{Metric, MetricIdentity, MetricResult, MetricValue, SumAccumulator},
    tuple::{Numeric, Tuple},
};

/// `avg(column)`: the [`SumAccumulator`] value divided by the number of
/// numeric contributions, reported as a double.
#[derive(Debug, Clone)]
pub struct MeanMetric {
    identity: MetricIdentity,
    sum: SumAccumulator,
    count: i64,
}

impl MeanMetric {
    pub fn new(column: &str) -> Self {
        Self::from_identity(MetricIdentity::new("avg", column))
    }

    pub fn from_expression(expression: &StreamExpression, operands: &dyn ValueOperands) -> MetricResult<Self> {
        MetricIdentity::from_expression(expression, operands).map(Self::from_identity)
    }

    fn from_identity(identity: MetricIdentity) -> Self {
        Self { identity, sum: SumAccumulator::default(), count: 0 }
    }
}

impl Metric for MeanMetric {
    fn function_name(&self) -> &str { self.identity.function_name() }

    fn identifier(&self) -> &str { self.identity.identifier() }

    fn columns(&self) -> &[String] { self.identity.columns() }

    fn update(&mut self, tuple: &Tuple) {
        match tuple.get(self.identity.column()).and_then(Numeric::classify) {
            Some(value) => {
                self.sum.add(value);
                self.count += 1;
            }
            None => trace!(metric = %self.identity, "skipping non-numeric value"),
        }
    }

    fn value(&self) -> MetricValue {
        if self.count == 0 {
            return MetricValue::Double(0.0);
        }
        let sum = self.sum.value().as_f64().unwrap_or(0.0);
        MetricValue::Double(sum / self.count as f64)
    }

    fn new_instance(&self) -> Box<dyn Metric> {
        Box::new(Self::from_identity(self.identity.clone()))
    }

    fn to_expression(&self, builder: &dyn ExpressionBuilder) -> StreamExpression {
        self.identity.to_expression(builder)
    }
}
