use tracing::trace;

use crate::{
    expression::StreamExpression,
    factory::{ExpressionBuilder, ValueOperands},
    metrics::{Metric, MetricIdentity, MetricResult, MetricValue},
    tuple::{Numeric, Tuple},
};

/// Integer and float running sums, kept apart until read.
///
/// On read the integer sum wins unless it is exactly zero, in which case the
/// float sum is reported. Mixed input whose integer part nets to zero therefore
/// reports only the float part.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SumAccumulator {
    long_sum: i64,
    double_sum: f64,
}

impl SumAccumulator {
    pub fn add(&mut self, value: Numeric) {
        match value {
            // two's complement wrap on overflow
            Numeric::Long(i) => self.long_sum = self.long_sum.wrapping_add(i),
            Numeric::Double(f) => self.double_sum += f,
        }
    }

    pub fn value(&self) -> MetricValue {
        if self.long_sum == 0 {
            MetricValue::Double(self.double_sum)
        } else {
            MetricValue::Long(self.long_sum)
        }
    }
}

/// `sum(column)`, see [`SumAccumulator`] for the read rule.
#[derive(Debug, Clone)]
pub struct SumMetric {
    identity: MetricIdentity,
    sum: SumAccumulator,
}

impl SumMetric {
    pub fn new(column: &str) -> Self {
        Self::from_identity(MetricIdentity::new("sum", column))
    }

    pub fn from_expression(expression: &StreamExpression, operands: &dyn ValueOperands) -> MetricResult<Self> {
        MetricIdentity::from_expression(expression, operands).map(Self::from_identity)
    }

    fn from_identity(identity: MetricIdentity) -> Self {
        Self { identity, sum: SumAccumulator::default() }
    }
}

impl Metric for SumMetric {
    fn function_name(&self) -> &str { self.identity.function_name() }

    fn identifier(&self) -> &str { self.identity.identifier() }

    fn columns(&self) -> &[String] { self.identity.columns() }

    fn update(&mut self, tuple: &Tuple) {
        match tuple.get(self.identity.column()).and_then(Numeric::classify) {
            Some(value) => self.sum.add(value),
            None => trace!(metric = %self.identity, "skipping non-numeric value"),
        }
    }

    fn value(&self) -> MetricValue {
        self.sum.value()
    }

    fn new_instance(&self) -> Box<dyn Metric> {
        Box::new(Self::from_identity(self.identity.clone()))
    }

    fn to_expression(&self, builder: &dyn ExpressionBuilder) -> StreamExpression {
        self.identity.to_expression(builder)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn feed(metric: &mut dyn Metric, values: &[serde_json::Value]) {
        for v in values {
            metric.update(&Tuple::new().with("x", v.clone()));
        }
    }

    #[test]
    fn sum_integers_reports_long() {
        let mut m = SumMetric::new("x");
        feed(&mut m, &[json!(2), json!(3)]);
        assert_eq!(m.value(), MetricValue::Long(5));
    }

    #[test]
    fn sum_floats_reports_double() {
        let mut m = SumMetric::new("x");
        feed(&mut m, &[json!(2.5), json!(1.5)]);
        assert_eq!(m.value(), MetricValue::Double(4.0));
    }

    #[test]
    fn mixed_input_reports_integer_part_when_non_zero() {
        let mut m = SumMetric::new("x");
        feed(&mut m, &[json!(2), json!(1.5)]);
        assert_eq!(m.value(), MetricValue::Long(2));
    }

    #[test]
    fn mixed_input_with_integer_part_netting_to_zero_reports_float_part() {
        let mut m = SumMetric::new("x");
        feed(&mut m, &[json!(3), json!(-3), json!(0.5)]);
        assert_eq!(m.value(), MetricValue::Double(0.5));
    }

    #[test]
    fn fresh_sum_is_zero_double() {
        assert_eq!(SumMetric::new("x").value(), MetricValue::Double(0.0));
    }

    #[test]
    fn absent_and_non_numeric_values_are_skipped() {
        let mut m = SumMetric::new("x");
        feed(&mut m, &[json!(4)]);
        m.update(&Tuple::new().with("y", 10));
        feed(&mut m, &[json!("12"), json!(null), json!(true), json!([1, 2])]);
        assert_eq!(m.value(), MetricValue::Long(4));
    }

    #[test]
    fn integer_overflow_wraps() {
        let mut m = SumMetric::new("x");
        feed(&mut m, &[json!(i64::MAX), json!(1)]);
        assert_eq!(m.value(), MetricValue::Long(i64::MIN));
    }

    #[test]
    fn new_instance_resets_state_and_keeps_identity() {
        let mut m = SumMetric::new("price");
        m.update(&Tuple::new().with("price", 7));

        let fresh = m.new_instance();
        assert_eq!(fresh.value(), MetricValue::Double(0.0));
        assert_eq!(fresh.identifier(), "sum(price)");
        assert_eq!(fresh.columns(), m.columns());
        // the source metric keeps its state
        assert_eq!(m.value(), MetricValue::Long(7));
    }
}
