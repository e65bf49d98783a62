use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use tracing::trace;

use crate::{
    expression::StreamExpression,
    factory::{ExpressionBuilder, ValueOperands},
    metrics::{Metric, MetricIdentity, MetricResult, MetricValue},
    tuple::{Numeric, Tuple},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Min,
    Max,
}

impl Extremum {
    pub fn function_name(&self) -> &'static str {
        match self {
            Extremum::Min => "min",
            Extremum::Max => "max",
        }
    }

    fn pick<T: Ord>(&self, current: T, candidate: T) -> T {
        match self {
            Extremum::Min => current.min(candidate),
            Extremum::Max => current.max(candidate),
        }
    }
}

/// Exact ordering of an integer against a float. JSON floats are finite.
fn cmp_long_double(long: i64, double: f64) -> Ordering {
    // i64 range as floats: [-2^63, 2^63)
    const LOWER: f64 = -9_223_372_036_854_775_808.0;
    if double < LOWER {
        return Ordering::Greater;
    }
    if double >= -LOWER {
        return Ordering::Less;
    }
    let floor = double.floor();
    match long.cmp(&(floor as i64)) {
        Ordering::Equal if double > floor => Ordering::Less,
        ord => ord,
    }
}

/// `min(column)` / `max(column)`.
///
/// Integer and float extremes are tracked apart and compared exactly on read;
/// the winner keeps its numeric type, ties go to the integer. Reports
/// [`MetricValue::Null`] until a numeric value arrives.
#[derive(Debug, Clone)]
pub struct ExtremaMetric {
    mode: Extremum,
    identity: MetricIdentity,
    long: Option<i64>,
    double: Option<OrderedFloat<f64>>,
}

impl ExtremaMetric {
    pub fn min(column: &str) -> Self {
        Self::from_identity(Extremum::Min, MetricIdentity::new(Extremum::Min.function_name(), column))
    }

    pub fn max(column: &str) -> Self {
        Self::from_identity(Extremum::Max, MetricIdentity::new(Extremum::Max.function_name(), column))
    }

    pub fn from_expression(
        mode: Extremum,
        expression: &StreamExpression,
        operands: &dyn ValueOperands,
    ) -> MetricResult<Self> {
        MetricIdentity::from_expression(expression, operands).map(|identity| Self::from_identity(mode, identity))
    }

    fn from_identity(mode: Extremum, identity: MetricIdentity) -> Self {
        Self { mode, identity, long: None, double: None }
    }

    pub fn mode(&self) -> Extremum {
        self.mode
    }
}

impl Metric for ExtremaMetric {
    fn function_name(&self) -> &str { self.identity.function_name() }

    fn identifier(&self) -> &str { self.identity.identifier() }

    fn columns(&self) -> &[String] { self.identity.columns() }

    fn update(&mut self, tuple: &Tuple) {
        match tuple.get(self.identity.column()).and_then(Numeric::classify) {
            Some(Numeric::Long(i)) => {
                self.long = Some(match self.long {
                    None => i,
                    Some(cur) => self.mode.pick(cur, i),
                });
            }
            Some(Numeric::Double(f)) => {
                let f = OrderedFloat(f);
                self.double = Some(match self.double {
                    None => f,
                    Some(cur) => self.mode.pick(cur, f),
                });
            }
            None => trace!(metric = %self.identity, "skipping non-numeric value"),
        }
    }

    fn value(&self) -> MetricValue {
        match (self.long, self.double) {
            (None, None) => MetricValue::Null,
            (Some(l), None) => MetricValue::Long(l),
            (None, Some(d)) => MetricValue::Double(d.into_inner()),
            (Some(l), Some(d)) => {
                let ord = cmp_long_double(l, d.into_inner());
                let long_wins = match self.mode {
                    Extremum::Min => ord.is_le(),
                    Extremum::Max => ord.is_ge(),
                };
                if long_wins { MetricValue::Long(l) } else { MetricValue::Double(d.into_inner()) }
            }
        }
    }

    fn new_instance(&self) -> Box<dyn Metric> {
        Box::new(Self::from_identity(self.mode, self.identity.clone()))
    }

    fn to_expression(&self, builder: &dyn ExpressionBuilder) -> StreamExpression {
        self.identity.to_expression(builder)
    }
}
