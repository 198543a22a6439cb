// Template expression expansion

use super::ast::{Expression, Modifier, Template, TemplatePart};
use super::operator::Operator;
use super::value::{Value, ValueStore};

/// Expands parsed templates against a value store.
///
/// Expansion never fails: unbound variables contribute nothing. Apart from
/// spaces becoming `%20`, values are copied into the URI unescaped.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateExpander;

impl TemplateExpander {
    pub fn new() -> Self {
        Self
    }

    /// Expand every expression of `template` and splice the results between its literals
    pub fn expand_template(&self, template: &Template, values: &ValueStore) -> String {
        let mut result = String::new();

        for part in &template.parts {
            match part {
                TemplatePart::Literal(s) => result.push_str(s),
                TemplatePart::Expression(expr) => result.push_str(&self.expand(expr, values)),
            }
        }

        result.replace(' ', "%20")
    }

    /// Expand a single expression.
    ///
    /// Returns an empty string, without the operator's insertion string, when
    /// none of the expression's variables is defined.
    pub fn expand(&self, expression: &Expression, values: &ValueStore) -> String {
        let operator = &expression.operator;

        let contributions: Vec<String> = expression
            .var_specs
            .iter()
            .filter_map(|spec| {
                let value = values.get(&spec.name).filter(|v| !v.is_empty_composite())?;
                Some(self.expand_variable(operator, &spec.name, spec.modifier, value))
            })
            .collect();

        if contributions.is_empty() {
            return String::new();
        }

        format!(
            "{}{}",
            operator.insertion,
            contributions.join(&operator.separator.to_string())
        )
    }

    fn expand_variable(&self, operator: &Operator, name: &str, modifier: Modifier, value: &Value) -> String {
        let separator = operator.separator.to_string();

        match (value, modifier) {
            (Value::Scalar(s), Modifier::PrefixLength(length)) => {
                named_pair(operator, name, &truncate_chars(s, length))
            }
            (Value::Scalar(s), _) => named_pair(operator, name, s),
            (Value::List(items), Modifier::Explode) => items
                .iter()
                .map(|item| named_pair(operator, name, item))
                .collect::<Vec<_>>()
                .join(&separator),
            // Prefix lengths do not apply to composite values
            (Value::List(items), _) => named_pair(operator, name, &items.join(",")),
            (Value::Map(entries), Modifier::Explode) => entries
                .iter()
                .map(|(key, item)| format!("{}={}", key, item))
                .collect::<Vec<_>>()
                .join(&separator),
            (Value::Map(entries), _) => {
                let flattened: Vec<&str> = entries
                    .iter()
                    .flat_map(|(key, item)| [key.as_str(), item.as_str()])
                    .collect();
                named_pair(operator, name, &flattened.join(","))
            }
        }
    }
}

fn named_pair(operator: &Operator, name: &str, value: &str) -> String {
    if operator.named {
        format!("{}={}", name, value)
    } else {
        value.to_string()
    }
}

fn truncate_chars(value: &str, length: usize) -> String {
    value.chars().take(length).collect()
}
