// Tourism client - typed calls over the resolver and a transport

use std::sync::Arc;

use crate::{
    domain::Catalog,
    error::{ClientError, Result},
    services::{
        cache::HypermediaCache,
        resolver::{Parameters, ResourceResolver},
        transport::Transport,
    },
    validation,
};

pub const FIND_POI: &str = "find-poi";
pub const FIND_EVENT: &str = "find-event";
pub const FIND_ROUTE: &str = "find-route";
pub const FIND_CATEGORIES: &str = "find-categories";
pub const FIND_TAGS: &str = "find-tags";
pub const FIND_POI_RELATION: &str = "find-poi-relation";
pub const FIND_EVENT_RELATION: &str = "find-event-relation";

/// Client stub for a hypermedia tourism endpoint.
///
/// Every call awaits exactly one transport request before returning.
pub struct TourismClient<T: Transport> {
    resolver: ResourceResolver,
    transport: T,
}

impl<T: Transport> TourismClient<T> {
    /// Load the hypermedia document for `home_uri`, from `cache` when present
    pub async fn connect(home_uri: &str, transport: T, cache: &dyn HypermediaCache) -> Result<Self> {
        validation::validate_home_uri(home_uri)?;

        let catalog = match cache.get(home_uri).await {
            Some(document) => {
                tracing::info!(%home_uri, "Using cached hypermedia document");
                Catalog::from_document(&document)?
            }
            None => {
                tracing::info!(%home_uri, "Fetching hypermedia document");
                let document = fetch_json(&transport, home_uri).await?;
                let catalog = Catalog::from_document(&document)?;
                cache.put(home_uri, document).await;
                catalog
            }
        };

        Ok(Self::from_catalog(catalog, transport))
    }

    pub fn from_catalog(catalog: Catalog, transport: T) -> Self {
        Self {
            resolver: ResourceResolver::new(Arc::new(catalog)),
            transport,
        }
    }

    pub fn use_version(&mut self, version: &str) {
        self.resolver.set_active_version(version);
    }

    pub fn resolver(&self) -> &ResourceResolver {
        &self.resolver
    }

    pub fn resources(&self) -> Result<Vec<String>> {
        self.resolver.list_resources()
    }

    pub fn has_resource(&self, resource: &str) -> Result<bool> {
        self.resolver.has_resource(resource)
    }

    pub fn has_resource_parameter(&self, resource: &str, parameter: &str) -> Result<bool> {
        self.resolver.has_resource_parameter(resource, parameter)
    }

    /// Points of Interest matching `parameters`
    pub async fn get_pois(&self, parameters: &Parameters) -> Result<serde_json::Value> {
        self.fetch(FIND_POI, parameters).await
    }

    pub async fn get_events(&self, parameters: &Parameters) -> Result<serde_json::Value> {
        self.fetch(FIND_EVENT, parameters).await
    }

    pub async fn get_routes(&self, parameters: &Parameters) -> Result<serde_json::Value> {
        self.fetch(FIND_ROUTE, parameters).await
    }

    /// Categories of POIs, events or routes; `parameters` must carry a `list` term
    pub async fn get_categories(&self, parameters: &Parameters) -> Result<serde_json::Value> {
        let uri = self.resolver.resolve_categorization(FIND_CATEGORIES, parameters)?;
        self.call(&uri).await
    }

    /// Tags of POIs, events or routes; `parameters` must carry a `list` term
    pub async fn get_tags(&self, parameters: &Parameters) -> Result<serde_json::Value> {
        let uri = self.resolver.resolve_categorization(FIND_TAGS, parameters)?;
        self.call(&uri).await
    }

    /// A single POI-based object, addressed by its base URI and id
    pub async fn get_poi(&self, base: &str, id: &str) -> Result<serde_json::Value> {
        self.call(&format!("{}{}", base, id)).await
    }

    pub async fn get_poi_relation(&self, base: &str, id: &str, relation: &str) -> Result<serde_json::Value> {
        let uri = self.resolver.resolve_relation(FIND_POI_RELATION, base, id, relation)?;
        self.call(&uri).await
    }

    pub async fn get_event_relation(&self, base: &str, id: &str, relation: &str) -> Result<serde_json::Value> {
        let uri = self.resolver.resolve_relation(FIND_EVENT_RELATION, base, id, relation)?;
        self.call(&uri).await
    }

    /// Resolve any catalog resource and call it
    pub async fn fetch(&self, resource: &str, parameters: &Parameters) -> Result<serde_json::Value> {
        let uri = self.resolver.resolve(resource, parameters)?;
        self.call(&uri).await
    }

    async fn call(&self, uri: &str) -> Result<serde_json::Value> {
        fetch_json(&self.transport, uri).await
    }
}

async fn fetch_json<T: Transport + ?Sized>(transport: &T, uri: &str) -> Result<serde_json::Value> {
    let response = transport.execute(uri).await?;

    if !response.is_ok() {
        tracing::warn!(%uri, status = response.status, "Server returned an error");
        return Err(ClientError::ServerError(response.status));
    }

    Ok(serde_json::from_str(&response.body)?)
}
