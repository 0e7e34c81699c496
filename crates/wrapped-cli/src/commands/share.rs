use std::io;
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;
use wrapped_core::share::share_action;
use wrapped_core::{AppConfig, ShareAction, ShareTarget};
use wrapped_tui::share::{copy_to_clipboard, dispatch};

use super::fetch_summary;

pub async fn run(
    config: &AppConfig,
    target: ShareTarget,
    print: bool,
    data: Option<PathBuf>,
) -> Result<()> {
    let summary = fetch_summary(config, data).await?;
    let action = share_action(target, &summary, &config.share.url)?;

    if print {
        match &action {
            ShareAction::OpenUrl(url) => println!("{}", url),
            ShareAction::CopyText(text) => println!("{}", text),
        }
        return Ok(());
    }

    match &action {
        ShareAction::CopyText(text) => {
            copy_to_clipboard(&mut io::stdout(), text)?;
            println!("Copied to clipboard:\n  {}", text);
        }
        ShareAction::OpenUrl(_) => {
            let message = dispatch(&action)?;
            println!("{}", message);
        }
    }
    info!(share_target = %target, "Shared");
    Ok(())
}
