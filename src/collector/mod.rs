pub mod error;
pub mod log;
pub mod maps;
pub mod types;

pub use error::CollectError;
pub use maps::MapsReviewCollector;
pub use types::{CollectorOptions, LoadOptions};
