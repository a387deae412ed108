pub mod app_config;
pub mod http_client;
pub mod view_store;

pub use app_config::Config;
pub use http_client::HttpResourceFetcher;
pub use view_store::{Aggregator, Cycle, ViewModelReader, ViewModelStore};
