pub mod export;
pub mod run;
pub mod share;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use wrapped_core::data::from_config;
use wrapped_core::{AppConfig, WrappedData};

/// Fetch the summary once, outside the TUI
pub async fn fetch_summary(config: &AppConfig, data: Option<PathBuf>) -> Result<WrappedData> {
    let source = from_config(config, data)?;
    info!(source = source.name(), "Fetching summary");
    source
        .fetch()
        .await
        .with_context(|| format!("Failed to fetch data from the {} source", source.name()))
}
