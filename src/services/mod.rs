pub mod cache;
pub mod client;
pub mod resolver;
pub mod transport;

pub use cache::{HypermediaCache, MemoryCache, NoCache};
pub use client::TourismClient;
pub use resolver::{Parameters, ResourceResolver};
pub use transport::{HttpTransport, Transport, TransportResponse};
