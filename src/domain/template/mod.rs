// Template module for RFC 6570-style URI templates
//
// This module provides parsing, value binding and expansion of link
// templates published in a hypermedia catalog.

mod ast;
mod expander;
pub mod operator;
mod parser;
mod uri_template;
mod value;

pub use ast::{Expression, Modifier, Template, TemplatePart, VarSpec};
pub use expander::TemplateExpander;
pub use operator::Operator;
pub use parser::TemplateParser;
pub use uri_template::UriTemplate;
pub use value::{Value, ValueStore};
