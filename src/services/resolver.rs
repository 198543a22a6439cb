// Resource resolver - gate validation and URI building over a catalog

use std::sync::Arc;

use crate::{
    domain::{
        template::{UriTemplate, Value},
        Catalog, CatalogEntry,
    },
    error::{ClientError, Result},
    validation,
};

/// Caller-supplied bindings for a resource call, in insertion order.
///
/// Like the template value store, the first binding of a name wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    entries: Vec<(String, Value)>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns false when `name` was already bound
    pub fn insert(&mut self, name: &str, value: impl Into<Value>) -> bool {
        if self.get(name).is_some() {
            return false;
        }
        self.entries.push((name.to_string(), value.into()));
        true
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build parameters from a JSON object, e.g. `{"tag": "culture", "limit": 10}`
    pub fn from_json(object: &serde_json::Value) -> Result<Self> {
        let entries = object.as_object().ok_or_else(|| {
            ClientError::InvalidValueType("parameters must be a JSON object".to_string())
        })?;

        let mut parameters = Self::new();
        for (name, value) in entries {
            parameters.insert(name, Value::from_json(name, value)?);
        }
        Ok(parameters)
    }
}

/// Validates calls against the catalog and builds the final call URI.
///
/// Gates run in a fixed order (version, resource, term or relation,
/// parameters) and the first failing gate is reported.
#[derive(Debug, Clone)]
pub struct ResourceResolver {
    catalog: Arc<Catalog>,
    active_version: Option<String>,
}

impl ResourceResolver {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            active_version: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn set_active_version(&mut self, version: &str) {
        self.active_version = Some(version.to_string());
    }

    pub fn active_version(&self) -> Option<&str> {
        self.active_version.as_deref()
    }

    /// Resource names available under the active version
    pub fn list_resources(&self) -> Result<Vec<String>> {
        let version = self.verify_version()?;
        Ok(self
            .catalog
            .resources(version)
            .unwrap_or_default()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    pub fn has_resource(&self, resource: &str) -> Result<bool> {
        let version = self.verify_version()?;
        Ok(self.catalog.entry(version, resource).is_some())
    }

    /// Whether `parameter` appears in the resource's link template
    pub fn has_resource_parameter(&self, resource: &str, parameter: &str) -> Result<bool> {
        let version = self.verify_version()?;
        Ok(self
            .catalog
            .entry(version, resource)
            .map(|entry| UriTemplate::new(&entry.href).has_parameter(parameter))
            .unwrap_or(false))
    }

    /// Run the version, resource and parameter gates, then build the call URI
    pub fn resolve(&self, resource: &str, parameters: &Parameters) -> Result<String> {
        let version = self.verify_version()?;
        let entry = self.validate_resource(version, resource)?;
        validate_parameters(entry, parameters)?;
        Ok(build_uri(resource, entry, parameters))
    }

    /// Like [`resolve`](Self::resolve), with the `list` term gate before the parameter gate
    pub fn resolve_categorization(&self, resource: &str, parameters: &Parameters) -> Result<String> {
        let version = self.verify_version()?;
        let entry = self.validate_resource(version, resource)?;
        validation::validate_list_term(parameters)?;
        validate_parameters(entry, parameters)?;
        Ok(build_uri(resource, entry, parameters))
    }

    /// Build the URI listing objects related to `base` + `id` by `relation`
    pub fn resolve_relation(&self, resource: &str, base: &str, id: &str, relation: &str) -> Result<String> {
        let version = self.verify_version()?;
        let entry = self.validate_resource(version, resource)?;
        let relation = validation::validate_relation(relation)?;

        let parameters = Parameters::new()
            .with("base", base)
            .with("id", id)
            .with("relation", relation.as_str());

        Ok(build_uri(resource, entry, &parameters))
    }

    fn verify_version(&self) -> Result<&str> {
        let version = self
            .active_version
            .as_deref()
            .ok_or_else(|| ClientError::VersionNotAvailable("Version must be set".to_string()))?;

        if !self.catalog.has_version(version) {
            return Err(ClientError::VersionNotAvailable(format!(
                "{} is not available in this server",
                version
            )));
        }

        Ok(version)
    }

    fn validate_resource(&self, version: &str, resource: &str) -> Result<&CatalogEntry> {
        self.catalog.entry(version, resource).ok_or_else(|| {
            ClientError::ResourceNotAvailable(format!("{} is not available in this server", resource))
        })
    }
}

// Non-templated entries take no parameters; supplied ones are ignored, not rejected
fn validate_parameters(entry: &CatalogEntry, parameters: &Parameters) -> Result<()> {
    if !entry.templated {
        return Ok(());
    }

    let template = UriTemplate::new(&entry.href);
    for (name, _) in parameters.iter() {
        if !template.has_parameter(name) {
            return Err(ClientError::InvalidParameter(format!("{} is not a valid parameter", name)));
        }
    }

    Ok(())
}

fn build_uri(resource: &str, entry: &CatalogEntry, parameters: &Parameters) -> String {
    if !entry.templated {
        if !parameters.is_empty() {
            tracing::debug!(resource, "Ignoring {} parameters for non-templated resource", parameters.len());
        }
        return entry.href.clone();
    }

    let mut template = UriTemplate::new(&entry.href);
    for (name, value) in parameters.iter() {
        template.set(name, value.clone());
    }

    let uri = template.build();
    tracing::debug!(resource, %uri, "Resolved resource");
    uri
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolver() -> ResourceResolver {
        let catalog = Catalog::from_document(&json!({
            "citysdk-tourism": [{
                "version": "1.0",
                "_links": {
                    "find-poi": {"href": "https://x/poi{?category,tag,limit,offset}", "templated": true},
                    "find-categories": {"href": "https://x/categories{?list,limit}", "templated": true},
                    "find-poi-relation": {"href": "{base}{id}{?relation}", "templated": true},
                    "find-route": {"href": "https://x/route"}
                }
            }]
        }))
        .unwrap();
        ResourceResolver::new(Arc::new(catalog))
    }

    #[test]
    fn test_version_gate_precedes_parameter_gate() {
        let resolver = resolver();
        let params = Parameters::new().with("bogus", 1);
        let err = resolver.resolve("find-poi", &params).unwrap_err();
        assert_eq!(err, ClientError::VersionNotAvailable("Version must be set".to_string()));
    }

    #[test]
    fn test_unknown_version() {
        let mut resolver = resolver();
        resolver.set_active_version("2.0");
        assert!(matches!(resolver.list_resources(), Err(ClientError::VersionNotAvailable(_))));
    }

    #[test]
    fn test_resource_gate() {
        let mut resolver = resolver();
        resolver.set_active_version("1.0");
        let err = resolver.resolve("find-event", &Parameters::new()).unwrap_err();
        assert_eq!(
            err,
            ClientError::ResourceNotAvailable("find-event is not available in this server".to_string())
        );
    }

    #[test]
    fn test_parameter_gate() {
        let mut resolver = resolver();
        resolver.set_active_version("1.0");
        let params = Parameters::new().with("tag", "culture").with("bogus", 1);
        let err = resolver.resolve("find-poi", &params).unwrap_err();
        assert_eq!(err, ClientError::InvalidParameter("bogus is not a valid parameter".to_string()));
    }

    #[test]
    fn test_resolve_builds_uri() {
        let mut resolver = resolver();
        resolver.set_active_version("1.0");
        let params = Parameters::new()
            .with("category", vec!["Museum", "Garden"])
            .with("tag", "culture")
            .with("limit", 10)
            .with("offset", 0);

        assert_eq!(
            resolver.resolve("find-poi", &params).unwrap(),
            "https://x/poi?category=Museum,Garden&tag=culture&limit=10&offset=0"
        );
    }

    #[test]
    fn test_non_templated_ignores_parameters() {
        let mut resolver = resolver();
        resolver.set_active_version("1.0");
        let params = Parameters::new().with("anything", "goes");
        assert_eq!(resolver.resolve("find-route", &params).unwrap(), "https://x/route");
    }

    #[test]
    fn test_categorization_requires_list_term() {
        let mut resolver = resolver();
        resolver.set_active_version("1.0");

        let err = resolver
            .resolve_categorization("find-categories", &Parameters::new())
            .unwrap_err();
        assert_eq!(err, ClientError::InvalidTerm("list parameter must be set".to_string()));

        // Term gate runs before the parameter gate
        let params = Parameters::new().with("list", "pois").with("bogus", 1);
        let err = resolver.resolve_categorization("find-categories", &params).unwrap_err();
        assert!(matches!(err, ClientError::InvalidTerm(_)));

        let params = Parameters::new().with("list", "event").with("limit", 5);
        assert_eq!(
            resolver.resolve_categorization("find-categories", &params).unwrap(),
            "https://x/categories?list=event&limit=5"
        );
    }

    #[test]
    fn test_relation_gate_and_uri() {
        let mut resolver = resolver();
        resolver.set_active_version("1.0");

        let err = resolver
            .resolve_relation("find-poi-relation", "http://x/poi/", "1", "sibling")
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidTerm(_)));

        assert_eq!(
            resolver
                .resolve_relation("find-poi-relation", "http://x/poi/", "1", "child")
                .unwrap(),
            "http://x/poi/1?relation=child"
        );
    }

    #[test]
    fn test_query_methods() {
        let mut resolver = resolver();
        assert!(resolver.has_resource("find-poi").is_err());

        resolver.set_active_version("1.0");
        assert!(resolver.has_resource("find-poi").unwrap());
        assert!(!resolver.has_resource("find-tags").unwrap());
        assert!(resolver.has_resource_parameter("find-poi", "tag").unwrap());
        assert!(!resolver.has_resource_parameter("find-poi", "relation").unwrap());
        assert!(!resolver.has_resource_parameter("find-tags", "tag").unwrap());
        assert_eq!(
            resolver.list_resources().unwrap(),
            vec!["find-poi", "find-categories", "find-poi-relation", "find-route"]
        );
    }

    #[test]
    fn test_parameters_from_json() {
        let params = Parameters::from_json(&json!({"tag": "culture", "category": ["a", "b"]})).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("tag"), Some(&Value::Scalar("culture".to_string())));

        assert!(matches!(
            Parameters::from_json(&json!({"limit": null})),
            Err(ClientError::InvalidValueType(_))
        ));
        assert!(Parameters::from_json(&json!(["tag"])).is_err());
    }
}
