// Job catalog and application lifecycle.

pub mod filter;
pub mod seed;
pub mod service;

pub use filter::JobFilter;
pub use service::CatalogService;
