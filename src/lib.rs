pub mod config;
pub mod error;
pub mod models;
pub mod logger;
pub mod delay_manager;
pub mod input_loader;
pub mod proxy_client;
pub mod extractor;
pub mod classifier;
pub mod crawler;
pub mod batch;
pub mod output_writer;

// Exporting types for convenience
pub use config::Config;
pub use error::ScrapeError;
pub use models::{CompanyResult, CompanyStatus, CompanyTask, FetchResult, JobRecord};
pub use proxy_client::{PageFetcher, ProxyClient};
pub use extractor::Extractor;
pub use crawler::{normalize_jobs_url, Crawler};
