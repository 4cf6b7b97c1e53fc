pub mod etl;
pub mod pipeline;
pub mod review;
pub mod search_links;

pub use crate::domain::ports::{ConfigProvider, EnrichResult, OutputFormat, Pipeline, Storage};
pub use crate::utils::error::Result;
