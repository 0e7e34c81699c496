use std::path::PathBuf;

use anyhow::Result;
use wrapped_core::AppConfig;

use super::fetch_summary;

pub async fn run(config: &AppConfig, data: Option<PathBuf>) -> Result<()> {
    let summary = fetch_summary(config, data).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
