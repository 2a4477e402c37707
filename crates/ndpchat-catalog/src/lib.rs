//! Catalog search service client.
//!
//! The catalog is consumed through one REST query contract: space-joined
//! search terms in, dataset records out. No filtering and no ranking happen
//! on this side; whatever the service returns is passed along verbatim.

mod client;

pub use client::{CatalogError, CatalogSearch, HttpCatalogClient, HttpCatalogClientConfig};
