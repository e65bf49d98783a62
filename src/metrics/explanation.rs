use serde::Serialize;

/// Describes a metric for query plan output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub function_name: String,
    pub implementing_type: String,
    pub expression_type: &'static str,
    pub expression: String,
}
