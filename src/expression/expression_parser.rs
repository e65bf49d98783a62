use crate::expression::{ExpressionParameter, ParseError, StreamExpression};

/// Char-walking parser for `name(operand, ...)` expressions.
///
/// Operands are bare values, double-quoted values, nested calls or
/// `name=value` pairs. Whitespace between tokens is ignored.
#[derive(Debug, Default)]
pub struct ExpressionParser {
    pub position: usize,
    pub length: usize,
    pub text_v: Vec<char>,
}

impl ExpressionParser {
    pub fn new(text: &str) -> Self {
        let text_v: Vec<char> = text.chars().collect();
        Self {
            position: 0,
            length: text_v.len(),
            text_v,
        }
    }

    /// Parses a whole text as a single expression.
    pub fn parse(text: &str) -> Result<StreamExpression, ParseError> {
        let mut parser = Self::new(text);
        let expression = parser.parse_expression()?;

        parser.next_non_whitespace();
        if !parser.eof() {
            return ParseError::at("Unexpected text after expression", parser.position, &parser).err();
        }

        Ok(expression)
    }

    pub fn eof(&self) -> bool {
        self.position >= self.length
    }

    pub fn current(&self) -> char {
        if self.position < self.length {
            return self.text_v[self.position];
        }

        '\0'
    }

    pub fn next(&mut self) {
        self.position += 1;
    }

    pub fn next_non_whitespace(&mut self) {
        while self.current().is_whitespace() {
            self.next();
        }
    }

    pub fn text_from_range(&self, start: usize, end: usize) -> String {
        let end = end.min(self.length);
        let start = start.min(end);
        self.text_v[start..end].iter().collect()
    }

    fn is_delimiter(c: char) -> bool {
        c.is_whitespace() || matches!(c, ',' | '(' | ')' | '=' | '"')
    }

    fn collect_token(&mut self) -> String {
        let mut token = String::new();
        while !self.eof() && !Self::is_delimiter(self.current()) {
            token.push(self.current());
            self.next();
        }
        token
    }

    fn parse_expression(&mut self) -> Result<StreamExpression, ParseError> {
        self.next_non_whitespace();
        let pivot = self.position;

        let name = self.collect_token();
        if name.is_empty() {
            return ParseError::at("Missing function name", pivot, self).err();
        }

        self.next_non_whitespace();
        self.parse_call(name, pivot)
    }

    /// Expects the parser at the opening parenthesis of `name(...)`.
    fn parse_call(&mut self, name: String, pivot: usize) -> Result<StreamExpression, ParseError> {
        if self.current() != '(' {
            return ParseError::at("Expected '(' after function name", pivot, self).err();
        }
        self.next();

        let mut expression = StreamExpression::new(&name);
        let mut can_consume = true;
        let mut after_comma = false;

        loop {
            self.next_non_whitespace();
            if self.eof() {
                return ParseError::at("Unclosed expression", pivot, self).err();
            }

            match self.current() {
                ')' => {
                    if after_comma {
                        return ParseError::at("Missing operand after ','", pivot, self).err();
                    }
                    self.next();
                    return Ok(expression);
                }
                ',' => {
                    if can_consume {
                        return ParseError::at("Invalid operand list", pivot, self).err();
                    }
                    can_consume = true;
                    after_comma = true;
                    self.next();
                }
                _ => {
                    if !can_consume {
                        return ParseError::at("Expected ',' or ')'", pivot, self).err();
                    }
                    expression.parameters.push(self.parse_parameter()?);
                    can_consume = false;
                    after_comma = false;
                }
            }
        }
    }

    fn parse_parameter(&mut self) -> Result<ExpressionParameter, ParseError> {
        let pivot = self.position;

        if self.current() == '"' {
            return self.parse_quoted().map(ExpressionParameter::Value);
        }

        let token = self.collect_token();
        if token.is_empty() {
            return ParseError::at("Invalid operand", pivot, self).err();
        }

        self.next_non_whitespace();
        match self.current() {
            '(' => self.parse_call(token, pivot).map(ExpressionParameter::Expression),
            '=' => {
                self.next();
                self.next_non_whitespace();
                if self.eof() {
                    return ParseError::at("Missing value for named operand", pivot, self).err();
                }
                let value = self.parse_parameter()?;
                if matches!(value, ExpressionParameter::Named { .. }) {
                    return ParseError::at("Invalid named operand", pivot, self).err();
                }
                Ok(ExpressionParameter::Named { name: token, value: Box::new(value) })
            }
            _ => Ok(ExpressionParameter::Value(token)),
        }
    }

    fn parse_quoted(&mut self) -> Result<String, ParseError> {
        let pivot = self.position;
        let mut value = String::new();
        self.next();

        loop {
            if self.eof() {
                return ParseError::at("Unterminated string", pivot, self).err();
            }
            match self.current() {
                '\\' => {
                    self.next();
                    if self.eof() {
                        return ParseError::at("Unterminated string", pivot, self).err();
                    }
                    value.push(self.current());
                }
                '"' => {
                    self.next();
                    return Ok(value);
                }
                c => value.push(c),
            }
            self.next();
        }
    }
}

#[cfg(test)]
pub mod tests {
    use crate::expression::{ExpressionParameter, ExpressionParser, StreamExpression};

    #[test]
    pub fn test_parse_single_operand() {
        let result = ExpressionParser::parse("sum(price)");

        match result {
            Ok(expr) => {
                assert_eq!(expr.function_name, "sum");
                assert_eq!(expr.parameters, vec![ExpressionParameter::Value("price".into())]);
            }
            Err(_) => panic!(),
        }
    }

    #[test]
    pub fn test_parse_with_whitespace() {
        let expr = ExpressionParser::parse("  max ( a_i )  ").unwrap();
        assert_eq!(expr, StreamExpression::new("max").with_parameter("a_i"));
    }

    #[test]
    pub fn test_parse_empty_operands() {
        let expr = ExpressionParser::parse("count()").unwrap();
        assert_eq!(expr.function_name, "count");
        assert!(expr.parameters.is_empty());
    }

    #[test]
    pub fn test_parse_nested_named_and_quoted() {
        let expr = ExpressionParser::parse("rollup(search(q=\"a b\", fl=x), over=x, sum(y))").unwrap();

        let expected = StreamExpression::new("rollup")
            .with_parameter(
                StreamExpression::new("search")
                    .with_named_parameter("q", "a b")
                    .with_named_parameter("fl", "x"),
            )
            .with_named_parameter("over", "x")
            .with_parameter(StreamExpression::new("sum").with_parameter("y"));

        assert_eq!(expr, expected);
    }

    #[test]
    pub fn test_parse_escaped_quote() {
        let expr = ExpressionParser::parse(r#"sum("a\"b")"#).unwrap();
        assert_eq!(expr.parameters, vec![ExpressionParameter::Value("a\"b".into())]);
    }

    #[test]
    pub fn test_parse_display_is_reparsable() {
        let text = "rollup(search(q=\"a b\",fl=x),over=x,sum(y))";
        let expr = ExpressionParser::parse(text).unwrap();
        assert_eq!(expr.to_string(), text);
        assert_eq!(ExpressionParser::parse(&expr.to_string()).unwrap(), expr);
    }

    #[test]
    pub fn test_parse_missing_name() {
        let err = ExpressionParser::parse("(price)").unwrap_err();
        assert_eq!(err.message, "Missing function name");
        assert_eq!(err.start, 0);
    }

    #[test]
    pub fn test_parse_unclosed() {
        let err = ExpressionParser::parse("sum(price").unwrap_err();
        assert_eq!(err.message, "Unclosed expression");
        assert_eq!(err.text, "sum(price");
        assert_eq!(err.start, 0);
        assert_eq!(err.end, 9);
    }

    #[test]
    pub fn test_parse_trailing_comma() {
        let err = ExpressionParser::parse("sum(a,)").unwrap_err();
        assert_eq!(err.message, "Missing operand after ','");
    }

    #[test]
    pub fn test_parse_double_comma() {
        let err = ExpressionParser::parse("sum(a,,b)").unwrap_err();
        assert_eq!(err.message, "Invalid operand list");
    }

    #[test]
    pub fn test_parse_missing_separator() {
        let err = ExpressionParser::parse("sum(a b)").unwrap_err();
        assert_eq!(err.message, "Expected ',' or ')'");
    }

    #[test]
    pub fn test_parse_trailing_text() {
        let err = ExpressionParser::parse("sum(a) x").unwrap_err();
        assert_eq!(err.message, "Unexpected text after expression");
        assert_eq!(err.start, 7);
    }

    #[test]
    pub fn test_parse_unterminated_string() {
        let err = ExpressionParser::parse("sum(\"abc").unwrap_err();
        assert_eq!(err.message, "Unterminated string");
        assert_eq!(err.start, 4);
    }
}
