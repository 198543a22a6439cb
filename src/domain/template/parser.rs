// Template parser using recursive descent
//
// Two modes share one grammar. Permissive parsing keeps malformed regions as
// literal text; strict parsing reports them as MalformedTemplate.

use super::ast::{Expression, Modifier, Template, TemplatePart, VarSpec};
use super::operator::{self, DEFAULT_OPERATOR};
use crate::error::{ClientError, Result};

pub struct TemplateParser {
    input: String,
    pos: usize,
    strict: bool,
}

impl TemplateParser {
    /// Parse permissively. Never fails: malformed fragments stay literal.
    pub fn parse(template: &str) -> Template {
        let mut parser = Self::new(template, false);
        parser
            .parse_template()
            .unwrap_or_else(|_| Template::new(vec![TemplatePart::Literal(template.to_string())]))
    }

    /// Parse strictly, rejecting unterminated, nested or empty expressions
    pub fn parse_strict(template: &str) -> Result<Template> {
        Self::new(template, true).parse_template()
    }

    fn new(template: &str, strict: bool) -> Self {
        Self {
            input: template.to_string(),
            pos: 0,
            strict,
        }
    }

    fn parse_template(&mut self) -> Result<Template> {
        let mut parts = Vec::new();
        let mut literal_buf = String::new();

        while self.pos < self.input.len() {
            match self.peek_char() {
                Some('{') => {
                    let start = self.pos;
                    match self.parse_expression() {
                        Ok(expr) => {
                            if !literal_buf.is_empty() {
                                parts.push(TemplatePart::Literal(std::mem::take(&mut literal_buf)));
                            }
                            parts.push(TemplatePart::Expression(expr));
                        }
                        Err(err) if self.strict => return Err(err),
                        Err(_) => {
                            let end = self.malformed_region_end(start);
                            literal_buf.push_str(&self.input[start..end]);
                            self.pos = end;
                        }
                    }
                }
                Some('}') if self.strict => {
                    return Err(self.malformed(self.pos, "unexpected closing brace"));
                }
                _ => literal_buf.push(self.consume_char()?),
            }
        }

        if !literal_buf.is_empty() {
            parts.push(TemplatePart::Literal(literal_buf));
        }

        Ok(Template::new(parts))
    }

    fn parse_expression(&mut self) -> Result<Expression> {
        let start = self.pos;
        self.expect_char('{')?;

        let operator = match self.peek_char().and_then(operator::find) {
            Some(op) => {
                self.consume_char()?;
                op
            }
            None => DEFAULT_OPERATOR,
        };

        let mut var_specs = Vec::new();
        let mut expecting_name = true;

        loop {
            match self.peek_char() {
                None => return Err(self.malformed(start, "unterminated expression")),
                Some('}') => {
                    self.consume_char()?;
                    break;
                }
                Some('{') => return Err(self.malformed(self.pos, "nested '{' inside expression")),
                Some(',') => {
                    if expecting_name {
                        return Err(self.malformed(self.pos, "empty variable name"));
                    }
                    self.consume_char()?;
                    expecting_name = true;
                }
                Some(ch) if is_name_char(ch) => {
                    var_specs.push(self.parse_var_spec()?);
                    expecting_name = false;
                }
                // Any other character separates back-to-back names
                Some(_) => {
                    self.consume_char()?;
                }
            }
        }

        if expecting_name {
            return Err(self.malformed(start, "empty variable name"));
        }

        Ok(Expression::new(operator, var_specs))
    }

    fn parse_var_spec(&mut self) -> Result<VarSpec> {
        let mut name = String::new();
        while let Some(ch) = self.peek_char() {
            if !is_name_char(ch) {
                break;
            }
            name.push(self.consume_char()?);
        }

        let modifier = match self.peek_char() {
            Some('*') => {
                self.consume_char()?;
                Modifier::Explode
            }
            Some(':') => {
                let colon = self.pos;
                self.consume_char()?;
                Modifier::PrefixLength(self.parse_prefix_length(colon)?)
            }
            _ => return Ok(VarSpec::new(name)),
        };

        // Any separator may follow a modifier, but not more name text or a second modifier
        match self.peek_char() {
            Some(ch) if is_name_char(ch) || ch == '*' || ch == ':' => Err(self.malformed(
                self.pos,
                &format!("unexpected '{}' after modifier of '{}'", ch, name),
            )),
            _ => Ok(VarSpec::new(name).with_modifier(modifier)),
        }
    }

    fn parse_prefix_length(&mut self, colon: usize) -> Result<usize> {
        let mut digits = String::new();
        while let Some(ch) = self.peek_char() {
            if !ch.is_ascii_digit() {
                break;
            }
            digits.push(self.consume_char()?);
        }

        match digits.parse::<usize>() {
            Ok(length) if length > 0 => Ok(length),
            _ => Err(self.malformed(colon, "prefix length must be a positive integer")),
        }
    }

    /// End of the text kept literal when an expression starting at `start` is malformed
    fn malformed_region_end(&self, start: usize) -> usize {
        let body = start + 1;
        match self.input[body..].find(|c: char| c == '{' || c == '}') {
            Some(offset) if self.input[body + offset..].starts_with('}') => body + offset + 1,
            Some(offset) => body + offset,
            None => self.input.len(),
        }
    }

    fn malformed(&self, position: usize, reason: &str) -> ClientError {
        ClientError::MalformedTemplate {
            position,
            reason: reason.to_string(),
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn consume_char(&mut self) -> Result<char> {
        let ch = self
            .peek_char()
            .ok_or_else(|| self.malformed(self.pos, "unexpected end of input"))?;
        self.pos += ch.len_utf8();
        Ok(ch)
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        match self.peek_char() {
            Some(ch) if ch == expected => {
                self.consume_char()?;
                Ok(())
            }
            Some(ch) => Err(self.malformed(
                self.pos,
                &format!("expected '{}' but found '{}'", expected, ch),
            )),
            None => Err(self.malformed(self.pos, &format!("expected '{}' but found end of input", expected))),
        }
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
