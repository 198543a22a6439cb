// Reusable URI template primitive: bind values, then build

use super::expander::TemplateExpander;
use super::parser::TemplateParser;
use super::value::{Value, ValueStore};
use crate::error::Result;

/// A template string plus its bindings for one expansion.
///
/// The template is re-parsed on every query so no parser state survives
/// between calls.
#[derive(Debug, Clone)]
pub struct UriTemplate {
    template: String,
    values: ValueStore,
}

impl UriTemplate {
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
            values: ValueStore::new(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Bind a value. The first binding of a name wins; later ones are ignored.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.values.set(name, value.into());
        self
    }

    /// Bind a decoded JSON value, failing with InvalidValueType for null or nested composites
    pub fn set_json(&mut self, name: &str, value: &serde_json::Value) -> Result<&mut Self> {
        let value = Value::from_json(name, value)?;
        Ok(self.set(name, value))
    }

    /// Whether any expression of the template declares `name`
    pub fn has_parameter(&self, name: &str) -> bool {
        TemplateParser::parse(&self.template).has_variable(name)
    }

    pub fn parameters(&self) -> Vec<String> {
        TemplateParser::parse(&self.template)
            .variable_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn build(&self) -> String {
        let parsed = TemplateParser::parse(&self.template);
        TemplateExpander::new().expand_template(&parsed, &self.values)
    }
}
