pub mod mock;
pub mod models;
pub mod source;
pub mod state;

pub use mock::sample_summary;
pub use models::*;
pub use source::{from_config, DataSource, FileSource, HttpSource, MockSource};
pub use state::DataState;
