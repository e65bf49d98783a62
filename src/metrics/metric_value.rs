use std::fmt;

use serde_json::{Number, Value};

use crate::tuple::Numeric;

/// Aggregate reported by [`crate::metrics::Metric::value`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Long(i64),
    Double(f64),
    /// Nothing to report yet, e.g. `min` before any numeric value arrived.
    Null,
}

impl MetricValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Long(i) => Some(*i as f64),
            MetricValue::Double(f) => Some(*f),
            MetricValue::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, MetricValue::Null)
    }
}

impl From<Numeric> for MetricValue {
    fn from(value: Numeric) -> Self {
        match value {
            Numeric::Long(i) => MetricValue::Long(i),
            Numeric::Double(f) => MetricValue::Double(f),
        }
    }
}

impl From<MetricValue> for Value {
    fn from(value: MetricValue) -> Self {
        match value {
            MetricValue::Long(i) => Value::Number(Number::from(i)),
            MetricValue::Double(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
            MetricValue::Null => Value::Null,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Long(i) => write!(f, "{}", i),
            MetricValue::Double(d) => write!(f, "{:?}", d),
            MetricValue::Null => write!(f, "null"),
        }
    }
}
