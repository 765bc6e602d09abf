pub mod data_source;
pub mod http;

pub use data_source::DataSource;
pub use http::{HttpFetcher, CSRF_HEADER};
