use tracing::debug;

use crate::{
    expression::{ExpressionParser, StreamExpression},
    factory::{ExpressionBuilder, FactoryConfig, ValueOperands},
    metrics::{Metric, MetricConstructor, MetricError, MetricRegistry, MetricResult},
};

/// Turns metric expressions into metrics and back.
#[derive(Debug, Clone)]
pub struct StreamFactory {
    config: FactoryConfig,
    registry: MetricRegistry,
}

impl Default for StreamFactory {
    fn default() -> Self {
        let config = FactoryConfig::default();
        let registry = MetricRegistry::default_metric_registry().with_case_insensitive(config.case_insensitive_names);
        Self { config, registry }
    }
}

impl StreamFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails when an alias points at a function that is not registered.
    pub fn from_config(config: FactoryConfig) -> MetricResult<Self> {
        let registry = MetricRegistry::default_metric_registry().with_case_insensitive(config.case_insensitive_names);

        if let Some((alias, target)) = config.aliases.iter().find(|(_, target)| !registry.contains(target)) {
            return Err(MetricError::Config(format!(
                "alias '{}' points to unknown function '{}'",
                alias, target
            )));
        }

        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    /// Registers (or replaces) the constructor behind `function_name`.
    pub fn with_function_name(mut self, function_name: &str, constructor: MetricConstructor) -> Self {
        self.registry.register(function_name, constructor);
        self
    }

    /// Follows a configured alias, otherwise returns `name` unchanged.
    pub fn resolve_function_name<'a>(&'a self, name: &'a str) -> &'a str {
        let found = if self.config.case_insensitive_names {
            self.config.aliases.iter().find(|(alias, _)| alias.eq_ignore_ascii_case(name))
        } else {
            self.config.aliases.get_key_value(name)
        };
        found.map_or(name, |(_, target)| target.as_str())
    }

    pub fn construct_metric(&self, text: &str) -> MetricResult<Box<dyn Metric>> {
        let expression = ExpressionParser::parse(text)?;
        self.construct_metric_from_expression(&expression)
    }

    pub fn construct_metric_from_expression(&self, expression: &StreamExpression) -> MetricResult<Box<dyn Metric>> {
        let name = self.resolve_function_name(&expression.function_name);
        let constructor = self
            .registry
            .get(name)
            .ok_or_else(|| MetricError::FunctionNotFound(expression.function_name.clone()))?;

        debug!(function = %expression.function_name, resolved = %name, "constructing metric");
        constructor(expression, self)
    }
}

impl ValueOperands for StreamFactory {
    fn value_operand(&self, expression: &StreamExpression, index: usize) -> Option<String> {
        expression.value_operands().nth(index).map(str::to_string)
    }
}

impl ExpressionBuilder for StreamFactory {
    fn function_expression(&self, function_name: &str) -> StreamExpression {
        StreamExpression::new(function_name)
    }
}
