// Shared helper functions used by the command line front end

use crate::{
    domain::template::Value,
    error::{ClientError, Result},
    services::Parameters,
};

/// Parse a `name=value` argument.
///
/// Values that parse as a JSON array or object become lists or maps;
/// everything else is kept as a plain string.
pub fn parse_parameter(argument: &str) -> Result<(String, Value)> {
    let (name, raw) = argument.split_once('=').ok_or_else(|| {
        ClientError::InvalidParameter(format!("{} should be written as name=value", argument))
    })?;

    if name.is_empty() {
        return Err(ClientError::InvalidParameter(format!("{} has an empty name", argument)));
    }

    let value = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json @ (serde_json::Value::Array(_) | serde_json::Value::Object(_))) => {
            Value::from_json(name, &json)?
        }
        _ => Value::Scalar(raw.to_string()),
    };

    Ok((name.to_string(), value))
}

/// Collect `name=value` arguments; a repeated name keeps its first value
pub fn parameters_from_args<'a>(arguments: impl IntoIterator<Item = &'a str>) -> Result<Parameters> {
    let mut parameters = Parameters::new();
    for argument in arguments {
        let (name, value) = parse_parameter(argument)?;
        if !parameters.insert(&name, value) {
            tracing::debug!(%name, "Ignoring repeated parameter");
        }
    }
    Ok(parameters)
}
