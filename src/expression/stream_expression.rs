use std::fmt;

/// One operand of a function call expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionParameter {
    /// A bare or quoted value, e.g. a column name.
    Value(String),
    /// A nested call, e.g. `search(...)` inside `rollup(...)`.
    Expression(StreamExpression),
    /// `name=value`
    Named { name: String, value: Box<ExpressionParameter> },
}

/// Parsed textual function call: `name(operand, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamExpression {
    pub function_name: String,
    pub parameters: Vec<ExpressionParameter>,
}

impl StreamExpression {
    pub fn new(function_name: &str) -> Self {
        Self {
            function_name: function_name.to_string(),
            parameters: vec![],
        }
    }

    pub fn with_parameter(mut self, parameter: impl Into<ExpressionParameter>) -> Self {
        self.parameters.push(parameter.into());
        self
    }

    pub fn with_named_parameter(mut self, name: &str, value: impl Into<ExpressionParameter>) -> Self {
        self.parameters.push(ExpressionParameter::Named {
            name: name.to_string(),
            value: Box::new(value.into()),
        });
        self
    }

    /// Plain value operands only, in positional order.
    pub fn value_operands(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().filter_map(|p| match p {
            ExpressionParameter::Value(v) => Some(v.as_str()),
            _ => None,
        })
    }
}

impl From<&str> for ExpressionParameter {
    fn from(value: &str) -> Self {
        ExpressionParameter::Value(value.to_string())
    }
}

impl From<String> for ExpressionParameter {
    fn from(value: String) -> Self {
        ExpressionParameter::Value(value)
    }
}

impl From<StreamExpression> for ExpressionParameter {
    fn from(value: StreamExpression) -> Self {
        ExpressionParameter::Expression(value)
    }
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ',' | '(' | ')' | '=' | '"' | '\\'))
}

impl fmt::Display for ExpressionParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionParameter::Value(v) if needs_quotes(v) => {
                write!(f, "\"")?;
                for c in v.chars() {
                    if c == '"' || c == '\\' {
                        write!(f, "\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                write!(f, "\"")
            }
            ExpressionParameter::Value(v) => write!(f, "{}", v),
            ExpressionParameter::Expression(e) => write!(f, "{}", e),
            ExpressionParameter::Named { name, value } => write!(f, "{}={}", name, value),
        }
    }
}

impl fmt::Display for StreamExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function_name)?;
        for (idx, parameter) in self.parameters.iter().enumerate() {
            if idx > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", parameter)?;
        }
        write!(f, ")")
    }
}
