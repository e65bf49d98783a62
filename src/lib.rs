//! Incremental aggregation metrics for tuple-streaming pipelines.
//!
//! A metric is built from an expression such as `sum(price)`, fed one
//! [`Tuple`] at a time and read at any point:
//!
//! ```
//! use stream_metrics::{Metric, MetricValue, StreamFactory, Tuple};
//!
//! let factory = StreamFactory::new();
//! let mut metric = factory.construct_metric("sum(price)").unwrap();
//! metric.update(&Tuple::new().with("price", 2));
//! metric.update(&Tuple::new().with("price", 3));
//! assert_eq!(metric.value(), MetricValue::Long(5));
//! assert_eq!(metric.to_expression(&factory).to_string(), "sum(price)");
//! ```

pub mod tuple;
pub use tuple::{Numeric, Tuple};

pub mod expression;
pub use expression::{ExpressionParameter, ExpressionParser, ParseError, StreamExpression};

pub mod factory;
pub use factory::{ExpressionBuilder, FactoryConfig, StreamFactory, ValueOperands};

pub mod metrics;
pub use metrics::{
    CountMetric, Explanation, Extremum, ExtremaMetric, MeanMetric, Metric, MetricError, MetricRegistry,
    MetricResult, MetricValue, SumAccumulator, SumMetric,
};
