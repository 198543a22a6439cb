// Validation functions for tourism-client
// Provides reusable checks for home URIs, templates and closed vocabularies

use url::Url;

use crate::{
    domain::{
        template::{Template, TemplateParser, Value},
        ListTerm, Relation,
    },
    error::{ClientError, Result},
    services::Parameters,
};

/// Validate the home URI of a hypermedia endpoint: absolute, http(s), with a host
pub fn validate_home_uri(home_uri: &str) -> Result<Url> {
    let url = home_uri
        .parse::<Url>()
        .map_err(|e| ClientError::InvalidHomeUri(format!("{}: {}", home_uri, e)))?;

    // Also covers javascript:, data: and file: URIs, and "example.com:80" parsed as a scheme
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ClientError::InvalidHomeUri(format!(
            "{}: only http:// and https:// URLs are allowed",
            home_uri
        )));
    }

    if url.host_str().is_none() {
        return Err(ClientError::InvalidHomeUri(format!("{}: URL must have a host", home_uri)));
    }

    Ok(url)
}

/// Validate URI template syntax strictly
///
/// Returns the parsed template, or ClientError::MalformedTemplate
pub fn validate_template(template: &str) -> Result<Template> {
    TemplateParser::parse_strict(template)
}

/// The `list` term of a categorization call must be present and one of poi, event, route
pub fn validate_list_term(parameters: &Parameters) -> Result<ListTerm> {
    match parameters.get("list") {
        None => Err(ClientError::InvalidTerm("list parameter must be set".to_string())),
        Some(Value::Scalar(term)) => term.parse(),
        Some(_) => Err(ClientError::InvalidTerm("list parameter must be a single term".to_string())),
    }
}

pub fn validate_relation(relation: &str) -> Result<Relation> {
    relation.parse()
}
