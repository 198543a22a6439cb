// Hypermedia catalog: version → resource name → link template

use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::BTreeMap};

use super::template::TemplateParser;
use crate::error::{ClientError, Result};

/// A resource link as published by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub href: String,
    #[serde(default)]
    pub templated: bool,
}

#[derive(Debug, Deserialize)]
struct HypermediaDocument {
    #[serde(rename = "citysdk-tourism", alias = "versions")]
    versions: Vec<VersionDescriptor>,
}

#[derive(Debug, Deserialize)]
struct VersionDescriptor {
    version: String,
    // serde_json's preserve_order keeps the links in document order
    #[serde(rename = "_links", alias = "links")]
    links: serde_json::Map<String, serde_json::Value>,
}

/// Resource links of one version, in document order
type ResourceLinks = Vec<(String, CatalogEntry)>;

/// Immutable view of a decoded hypermedia document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    versions: BTreeMap<String, ResourceLinks>,
}

impl Catalog {
    /// Build the catalog from an already decoded hypermedia document
    pub fn from_document(document: &serde_json::Value) -> Result<Self> {
        let document = HypermediaDocument::deserialize(document)
            .map_err(|e| ClientError::MalformedCatalog(e.to_string()))?;

        let mut versions = BTreeMap::new();
        for descriptor in document.versions {
            let mut links = ResourceLinks::with_capacity(descriptor.links.len());
            for (name, link) in descriptor.links {
                let entry = CatalogEntry::deserialize(&link).map_err(|e| {
                    ClientError::MalformedCatalog(format!("{}: {}", name, e))
                })?;

                if entry.templated {
                    if let Err(e) = TemplateParser::parse_strict(&entry.href) {
                        tracing::warn!(
                            version = %descriptor.version,
                            resource = %name,
                            "Templated href does not parse strictly: {}",
                            e
                        );
                    }
                }
                links.push((name, entry));
            }
            // A repeated version replaces the earlier descriptor
            versions.insert(descriptor.version, links);
        }

        Ok(Self { versions })
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let document: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| ClientError::MalformedCatalog(e.to_string()))?;
        Self::from_document(&document)
    }

    pub fn versions(&self) -> Vec<&str> {
        self.versions.keys().map(String::as_str).collect()
    }

    pub fn has_version(&self, version: &str) -> bool {
        self.versions.contains_key(version)
    }

    /// Highest listed version, comparing dot-separated numeric parts as numbers
    pub fn latest_version(&self) -> Option<&str> {
        self.versions
            .keys()
            .max_by(|a, b| compare_versions(a, b))
            .map(String::as_str)
    }

    /// Resource names under `version`, in document order
    pub fn resources(&self, version: &str) -> Option<Vec<&str>> {
        self.versions
            .get(version)
            .map(|links| links.iter().map(|(name, _)| name.as_str()).collect())
    }

    pub fn entry(&self, version: &str, resource: &str) -> Option<&CatalogEntry> {
        self.versions
            .get(version)?
            .iter()
            .find(|(name, _)| name == resource)
            .map(|(_, entry)| entry)
    }
}

fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        let ordering = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => match (l.parse::<u64>(), r.parse::<u64>()) {
                (Ok(l), Ok(r)) => l.cmp(&r),
                _ => l.cmp(r),
            },
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}
