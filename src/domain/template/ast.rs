// Abstract Syntax Tree types for URI templates

use super::operator::Operator;

/// Represents a parsed template as a list of parts
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub parts: Vec<TemplatePart>,
}

impl Template {
    pub fn new(parts: Vec<TemplatePart>) -> Self {
        Self { parts }
    }

    /// Get all expressions in this template, left to right
    pub fn expressions(&self) -> Vec<&Expression> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                TemplatePart::Expression(expr) => Some(expr),
                _ => None,
            })
            .collect()
    }

    /// Names of every variable across all expressions, in template order
    pub fn variable_names(&self) -> Vec<&str> {
        self.expressions()
            .into_iter()
            .flat_map(|expr| expr.var_specs.iter().map(|spec| spec.name.as_str()))
            .collect()
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variable_names().contains(&name)
    }
}

/// A template consists of literal strings and bracketed expressions
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Literal(String),
    Expression(Expression),
}

/// One `{...}` region: an operator shared by an ordered list of variables
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub operator: Operator,
    pub var_specs: Vec<VarSpec>,
}

impl Expression {
    pub fn new(operator: Operator, var_specs: Vec<VarSpec>) -> Self {
        Self { operator, var_specs }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarSpec {
    pub name: String,
    pub modifier: Modifier,
}

impl VarSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifier: Modifier::None,
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }
}

/// Variable modifiers; explode and prefix are mutually exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    None,
    Explode,
    PrefixLength(usize),
}
