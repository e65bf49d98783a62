use indexmap::IndexMap;
use serde_json::{Map, Value};

/// One record flowing through the pipeline: field name -> value, in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tuple {
    fields: IndexMap<String, Value>,
}

impl Tuple {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style insert, handy for fixtures.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.to_string(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    /// Accepts only JSON objects.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::from(map)),
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields.into_iter().collect())
    }
}

impl From<Map<String, Value>> for Tuple {
    fn from(map: Map<String, Value>) -> Self {
        Self { fields: map.into_iter().collect() }
    }
}

impl FromIterator<(String, Value)> for Tuple {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}
