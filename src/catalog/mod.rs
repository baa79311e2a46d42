mod error;
mod metrics;
mod service;

pub use error::{CatalogError, CatalogResult};
pub use metrics::CatalogMetrics;
pub use service::{CatalogService, ReconcileReport};
