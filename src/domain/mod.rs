// Domain model: URI templates, the hypermedia catalog and the term whitelists

pub mod catalog;
pub mod template;
pub mod terms;

pub use catalog::{Catalog, CatalogEntry};
pub use terms::{ListTerm, Relation};
