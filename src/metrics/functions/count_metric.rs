use serde_json::Value;

use crate::{
    expression::StreamExpression,
    factory::{ExpressionBuilder, ValueOperands},
    metrics::{Metric, MetricIdentity, MetricResult, MetricValue},
    tuple::Tuple,
};

/// Column name that makes `count` count every tuple.
pub const ALL_COLUMNS: &str = "*";

/// `count(column)` counts tuples holding a non-null value at `column`;
/// `count(*)` counts every tuple.
#[derive(Debug, Clone)]
pub struct CountMetric {
    identity: MetricIdentity,
    count: i64,
}

impl CountMetric {
    pub fn new(column: &str) -> Self {
        Self::from_identity(MetricIdentity::new("count", column))
    }

    pub fn all() -> Self {
        Self::new(ALL_COLUMNS)
    }

    pub fn from_expression(expression: &StreamExpression, operands: &dyn ValueOperands) -> MetricResult<Self> {
        MetricIdentity::from_expression(expression, operands).map(Self::from_identity)
    }

    fn from_identity(identity: MetricIdentity) -> Self {
        Self { identity, count: 0 }
    }

    pub fn is_all_columns(&self) -> bool {
        self.identity.column() == ALL_COLUMNS
    }
}

impl Metric for CountMetric {
    fn function_name(&self) -> &str { self.identity.function_name() }

    fn identifier(&self) -> &str { self.identity.identifier() }

    fn columns(&self) -> &[String] { self.identity.columns() }

    fn update(&mut self, tuple: &Tuple) {
        if self.is_all_columns() {
            self.count += 1;
            return;
        }
        match tuple.get(self.identity.column()) {
            None | Some(Value::Null) => {}
            Some(_) => self.count += 1,
        }
    }

    fn value(&self) -> MetricValue {
        MetricValue::Long(self.count)
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

    fn tuples() -> Vec<Tuple> {
        [
            json!({ "a": 1 }),
            json!({ "a": "text" }),
            json!({ "a": null }),
            json!({ "b": 2 }),
            json!({ "a": 2.5 }),
        ]
        .into_iter()
        .filter_map(Tuple::from_json)
        .collect()
    }

    #[test]
    fn count_column_counts_present_values_of_any_type() {
        let mut m = CountMetric::new("a");
        tuples().iter().for_each(|t| m.update(t));
        assert_eq!(m.value(), MetricValue::Long(3));
    }

    #[test]
    fn count_star_counts_every_tuple() {
        let mut m = CountMetric::all();
        tuples().iter().for_each(|t| m.update(t));
        assert_eq!(m.value(), MetricValue::Long(5));
        assert_eq!(m.identifier(), "count(*)");
        assert_eq!(m.columns(), &["*".to_string()]);
    }

    #[test]
    fn fresh_and_new_instance_are_zero() {
        let mut m = CountMetric::new("a");
        assert_eq!(m.value(), MetricValue::Long(0));
        m.update(&Tuple::new().with("a", 1));
        assert_eq!(m.new_instance().value(), MetricValue::Long(0));
    }
}
