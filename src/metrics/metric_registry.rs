use std::{collections::HashMap, fmt};

use once_cell::sync::Lazy;
use tracing::warn;

use crate::{
    expression::StreamExpression,
    factory::ValueOperands,
    metrics::{CountMetric, Extremum, ExtremaMetric, MeanMetric, Metric, MetricError, MetricResult, SumMetric},
};

/// Builds a metric from a parsed expression.
pub type MetricConstructor = fn(&StreamExpression, &dyn ValueOperands) -> MetricResult<Box<dyn Metric>>;

static DEFAULT_REGISTRY: Lazy<MetricRegistry> = Lazy::new(MetricRegistry::default_metric_registry);

/// Registry of metric constructors keyed by function name.
#[derive(Clone)]
pub struct MetricRegistry {
    by_name: HashMap<String, MetricConstructor>,
    case_insensitive: bool,
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self { by_name: HashMap::new(), case_insensitive: true }
    }
}

impl MetricRegistry {
    pub fn new() -> Self { Self::default() }

    /// Shared registry with the built-in metrics.
    pub fn global() -> &'static MetricRegistry {
        &DEFAULT_REGISTRY
    }

    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        if case_insensitive && !self.case_insensitive {
            self.by_name = self.by_name.into_iter().map(|(k, v)| (k.to_ascii_lowercase(), v)).collect();
        }
        self.case_insensitive = case_insensitive;
        self
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    fn key(&self, name: &str) -> String {
        if self.case_insensitive { name.to_ascii_lowercase() } else { name.to_string() }
    }

    pub fn register(&mut self, name: &str, constructor: MetricConstructor) {
        if self.by_name.insert(self.key(name), constructor).is_some() {
            warn!(function = %name, "metric constructor replaced");
        }
    }

    pub fn get(&self, name: &str) -> Option<MetricConstructor> {
        self.by_name.get(&self.key(name)).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&self.key(name))
    }

    pub fn list(&self) -> Vec<String> {
        let mut v: Vec<_> = self.by_name.keys().cloned().collect();
        v.sort();
        v
    }

    /// Builds the metric named by `expression.function_name`.
    pub fn construct(&self, expression: &StreamExpression, operands: &dyn ValueOperands) -> MetricResult<Box<dyn Metric>> {
        let constructor = self
            .get(&expression.function_name)
            .ok_or_else(|| MetricError::FunctionNotFound(expression.function_name.clone()))?;
        constructor(expression, operands)
    }

    pub fn default_metric_registry() -> Self {
        let mut registry = Self::new();
        registry.register("sum", sum);
        registry.register("count", count);
        registry.register("min", min);
        registry.register("max", max);
        registry.register("avg", mean);
        registry.register("mean", mean);
        registry
    }
}

impl fmt::Debug for MetricRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricRegistry")
            .field("functions", &self.list())
            .field("case_insensitive", &self.case_insensitive)
            .finish()
    }
}

fn sum(expression: &StreamExpression, operands: &dyn ValueOperands) -> MetricResult<Box<dyn Metric>> {
    Ok(Box::new(SumMetric::from_expression(expression, operands)?))
}

fn count(expression: &StreamExpression, operands: &dyn ValueOperands) -> MetricResult<Box<dyn Metric>> {
    Ok(Box::new(CountMetric::from_expression(expression, operands)?))
}

fn min(expression: &StreamExpression, operands: &dyn ValueOperands) -> MetricResult<Box<dyn Metric>> {
    Ok(Box::new(ExtremaMetric::from_expression(Extremum::Min, expression, operands)?))
}

fn max(expression: &StreamExpression, operands: &dyn ValueOperands) -> MetricResult<Box<dyn Metric>> {
    Ok(Box::new(ExtremaMetric::from_expression(Extremum::Max, expression, operands)?))
}

fn mean(expression: &StreamExpression, operands: &dyn ValueOperands) -> MetricResult<Box<dyn Metric>> {
    Ok(Box::new(MeanMetric::from_expression(expression, operands)?))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{expression::ExpressionParser, factory::StreamFactory, metrics::MetricValue, tuple::Tuple};

    fn construct(registry: &MetricRegistry, text: &str) -> MetricResult<Box<dyn Metric>> {
        let expr = ExpressionParser::parse(text).unwrap();
        registry.construct(&expr, &StreamFactory::new())
    }

    #[test]
    fn registry_contains_all_and_lookup_is_case_insensitive() {
        let r = MetricRegistry::default_metric_registry();
        assert_eq!(r.list(), vec!["avg", "count", "max", "mean", "min", "sum"]);

        assert!(r.get("COUNT").is_some());
        assert!(r.get("sUm").is_some());
        assert!(r.get("Avg").is_some());
        assert!(r.get("median").is_none());
    }

    #[test]
    fn case_sensitive_registry() {
        let r = MetricRegistry::default_metric_registry().with_case_insensitive(false);
        assert!(r.get("sum").is_some());
        assert!(r.get("SUM").is_none());
    }

    #[test]
    fn construct_keeps_authored_function_name() {
        let r = MetricRegistry::global();
        let metric = construct(r, "SUM(price)").unwrap();
        assert_eq!(metric.function_name(), "SUM");
        assert_eq!(metric.identifier(), "SUM(price)");
    }

    #[test]
    fn construct_unknown_function() {
        let err = construct(MetricRegistry::global(), "median(x)").unwrap_err();
        assert_eq!(err, MetricError::FunctionNotFound("median".into()));
    }

    #[test]
    fn constructed_metrics_basic_semantics() {
        let r = MetricRegistry::global();
        let rows: Vec<Tuple> = [json!({ "x": 5 }), json!({ "x": 2 }), json!({ "x": null }), json!({ "x": 9 })]
            .into_iter()
            .filter_map(Tuple::from_json)
            .collect();

        let expected = [
            ("sum(x)", MetricValue::Long(16)),
            ("count(x)", MetricValue::Long(3)),
            ("count(*)", MetricValue::Long(4)),
            ("min(x)", MetricValue::Long(2)),
            ("max(x)", MetricValue::Long(9)),
            ("avg(x)", MetricValue::Double(16.0 / 3.0)),
        ];

        for (text, value) in expected {
            let mut metric = construct(r, text).unwrap();
            rows.iter().for_each(|t| metric.update(t));
            assert_eq!(metric.value(), value, "{}", text);
        }
    }

    #[test]
    fn register_replaces_existing() {
        let mut r = MetricRegistry::default_metric_registry();
        r.register("avg", sum);
        let metric = construct(&r, "avg(x)").unwrap();
        assert!(metric.explain(&StreamFactory::new()).implementing_type.ends_with("SumMetric"));
    }
}
