use serde_json::Value;

/// Runtime numeric subtype of a tuple value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Long(i64),
    Double(f64),
}

impl Numeric {
    /// Integers that fit `i64` are integer-typed, every other JSON number is float-typed.
    /// Anything that is not a number yields `None`.
    pub fn classify(value: &Value) -> Option<Numeric> {
        let Value::Number(n) = value else {
            return None;
        };
        if let Some(i) = n.as_i64() {
            Some(Numeric::Long(i))
        } else {
            n.as_f64().map(Numeric::Double)
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Numeric::Long(i) => *i as f64,
            Numeric::Double(f) => *f,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn classify_integers_and_floats() {
        assert_eq!(Numeric::classify(&json!(2)), Some(Numeric::Long(2)));
        assert_eq!(Numeric::classify(&json!(-7)), Some(Numeric::Long(-7)));
        assert_eq!(Numeric::classify(&json!(2.5)), Some(Numeric::Double(2.5)));
        // float-typed even when integral
        assert_eq!(Numeric::classify(&json!(2.0)), Some(Numeric::Double(2.0)));
    }

    #[test]
    fn classify_large_unsigned_as_double() {
        let big = json!(u64::MAX);
        assert_eq!(Numeric::classify(&big), Some(Numeric::Double(u64::MAX as f64)));
    }

    #[test]
    fn classify_non_numeric() {
        assert_eq!(Numeric::classify(&json!("12")), None);
        assert_eq!(Numeric::classify(&json!(null)), None);
        assert_eq!(Numeric::classify(&json!(true)), None);
        assert_eq!(Numeric::classify(&json!([1])), None);
    }
}
