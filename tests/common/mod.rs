// Common test utilities shared across test files

use async_trait::async_trait;
use serde_json::json;
use std::{collections::HashMap, sync::Mutex};
use tourism_client::{
    error::Result,
    services::{Transport, TransportResponse},
    Catalog,
};

pub const HOME_URI: &str = "http://tourism.example.org/";

/// A hypermedia document with one version and the usual find-* resources
#[allow(dead_code)]
pub fn sample_document() -> serde_json::Value {
    json!({
        "citysdk-tourism": [
            {
                "version": "1.0",
                "_links": {
                    "find-poi": {
                        "href": "http://tourism.example.org/pois/search{?category,tag,complete,minimal,limit,offset}",
                        "templated": true
                    },
                    "find-event": {
                        "href": "http://tourism.example.org/events/search{?category,tag,time,limit,offset}",
                        "templated": true
                    },
                    "find-route": {
                        "href": "http://tourism.example.org/routes/search{?category,limit}",
                        "templated": true
                    },
                    "find-categories": {
                        "href": "http://tourism.example.org/categories/search{?list,limit,offset}",
                        "templated": true
                    },
                    "find-tags": {
                        "href": "http://tourism.example.org/tags/search{?list,limit}",
                        "templated": true
                    },
                    "find-poi-relation": {
                        "href": "{base}{id}/{relation}",
                        "templated": true
                    },
                    "find-event-relation": {
                        "href": "{base}{id}/{relation}{?limit}",
                        "templated": true
                    },
                    "find-agencies": {
                        "href": "http://tourism.example.org/agencies"
                    }
                }
            }
        ]
    })
}

#[allow(dead_code)]
pub fn sample_catalog() -> Catalog {
    Catalog::from_document(&sample_document()).expect("sample document is valid")
}

/// Transport answering from canned responses and recording every requested URI
#[allow(dead_code)]
#[derive(Default)]
pub struct MockTransport {
    responses: HashMap<String, TransportResponse>,
    requests: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, uri: &str, status: u16, body: impl Into<String>) -> Self {
        self.responses
            .insert(uri.to_string(), TransportResponse::new(status, body));
        self
    }

    pub fn with_json(self, uri: &str, body: &serde_json::Value) -> Self {
        self.with_response(uri, 200, body.to_string())
    }

    /// Mock serving the sample document at [`HOME_URI`]
    pub fn with_home() -> Self {
        Self::new().with_json(HOME_URI, &sample_document())
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, uri: &str) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(uri.to_string());
        Ok(self
            .responses
            .get(uri)
            .cloned()
            .unwrap_or_else(|| TransportResponse::new(404, "")))
    }
}
