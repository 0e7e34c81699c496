//! Share message and share links for the loaded summary
//!
//! Building a link is pure; opening it or writing to the clipboard is left to
//! the caller.

use std::fmt;
use std::str::FromStr;

use url::form_urlencoded::byte_serialize;
use url::Url;

use crate::data::WrappedData;
use crate::format::format_naira;
use crate::{Error, Result};

const TWITTER_INTENT: &str = "https://twitter.com/intent/tweet";
const WHATSAPP_SEND: &str = "https://wa.me/";

/// Where a share goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShareTarget {
    /// The system's default handler (a prefilled mail draft)
    Native,
    Twitter,
    WhatsApp,
    /// Message and link copied to the clipboard
    Copy,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 4] = [
        ShareTarget::Twitter,
        ShareTarget::WhatsApp,
        ShareTarget::Copy,
        ShareTarget::Native,
    ];

    /// Button label in the share menu
    pub fn label(&self) -> &'static str {
        match self {
            ShareTarget::Native => "Share via mail",
            ShareTarget::Twitter => "Share on X",
            ShareTarget::WhatsApp => "Share on WhatsApp",
            ShareTarget::Copy => "Copy Link",
        }
    }
}

impl fmt::Display for ShareTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShareTarget::Native => "native",
            ShareTarget::Twitter => "twitter",
            ShareTarget::WhatsApp => "whatsapp",
            ShareTarget::Copy => "copy",
        };
        f.write_str(name)
    }
}

impl FromStr for ShareTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "native" | "mail" => Ok(ShareTarget::Native),
            "twitter" | "x" => Ok(ShareTarget::Twitter),
            "whatsapp" => Ok(ShareTarget::WhatsApp),
            "copy" | "clipboard" => Ok(ShareTarget::Copy),
            other => Err(Error::Share(format!("Unknown share target: {}", other))),
        }
    }
}

/// What the caller has to do to complete a share
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareAction {
    /// Open this URL with the system handler
    OpenUrl(String),
    /// Put this text on the clipboard
    CopyText(String),
}

/// The fixed-format share message
pub fn share_message(data: &WrappedData) -> String {
    format!(
        "I spent {} and saved {} in {} with OPay! 🎉 Check out your #OPayWrapped",
        format_naira(data.spending.total),
        format_naira(data.savings.total),
        data.year
    )
}

/// Title used by share targets that support one
pub fn share_title(data: &WrappedData) -> String {
    format!("My OPay Wrapped {}", data.year)
}

/// Percent-encode a component with `%20` for spaces
fn encode_component(value: &str) -> String {
    byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Build the action for `target`
pub fn share_action(target: ShareTarget, data: &WrappedData, share_url: &str) -> Result<ShareAction> {
    // Reject a misconfigured link before handing it to anything external,
    // but keep the configured text since parsing normalizes it
    Url::parse(share_url)?;
    let text = share_message(data);

    match target {
        ShareTarget::Twitter => {
            let mut url = Url::parse(TWITTER_INTENT)?;
            url.query_pairs_mut()
                .append_pair("text", &text)
                .append_pair("url", share_url);
            Ok(ShareAction::OpenUrl(url.into()))
        }
        ShareTarget::WhatsApp => {
            let mut url = Url::parse(WHATSAPP_SEND)?;
            url.query_pairs_mut()
                .append_pair("text", &format!("{} {}", text, share_url));
            Ok(ShareAction::OpenUrl(url.into()))
        }
        ShareTarget::Native => Ok(ShareAction::OpenUrl(format!(
            "mailto:?subject={}&body={}",
            encode_component(&share_title(data)),
            encode_component(&format!("{} {}", text, share_url))
        ))),
        ShareTarget::Copy => Ok(ShareAction::CopyText(format!("{} {}", text, share_url))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_summary;

    const LINK: &str = "https://wrapped.opay.com";

    fn query(url: &str) -> Vec<(String, String)> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_share_message() {
        assert_eq!(
            share_message(&sample_summary()),
            "I spent ₦2,450,000 and saved ₦850,000 in 2024 with OPay! 🎉 Check out your #OPayWrapped"
        );
    }

    #[test]
    fn test_twitter_link_encodes_text_and_url() {
        let data = sample_summary();
        let ShareAction::OpenUrl(url) = share_action(ShareTarget::Twitter, &data, LINK).unwrap() else {
            panic!("expected a url");
        };
        assert!(url.starts_with(TWITTER_INTENT));
        assert!(!url.contains('#'));
        let pairs = query(&url);
        assert_eq!(pairs[0], ("text".to_string(), share_message(&data)));
        assert_eq!(pairs[1].1, LINK);
    }

    #[test]
    fn test_whatsapp_link_joins_text_and_url() {
        let data = sample_summary();
        let ShareAction::OpenUrl(url) = share_action(ShareTarget::WhatsApp, &data, LINK).unwrap() else {
            panic!("expected a url");
        };
        let pairs = query(&url);
        assert_eq!(pairs.len(), 1);
        assert!(pairs[0].1.starts_with("I spent ₦2,450,000"));
        assert!(pairs[0].1.ends_with(" https://wrapped.opay.com"));
    }

    #[test]
    fn test_copy_yields_message_and_link() {
        let data = sample_summary();
        let action = share_action(ShareTarget::Copy, &data, LINK).unwrap();
        assert_eq!(
            action,
            ShareAction::CopyText(format!("{} https://wrapped.opay.com", share_message(&data)))
        );
    }

    #[test]
    fn test_native_is_mailto_without_plus_signs() {
        let data = sample_summary();
        let ShareAction::OpenUrl(url) = share_action(ShareTarget::Native, &data, LINK).unwrap() else {
            panic!("expected a url");
        };
        assert!(url.starts_with("mailto:?subject=My%20OPay%20Wrapped%202024&body="));
        assert!(!url.contains('+'));
    }

    #[test]
    fn test_bad_share_url_rejected() {
        assert!(share_action(ShareTarget::Copy, &sample_summary(), "nope").is_err());
    }

    #[test]
    fn test_target_parsing() {
        assert_eq!("X".parse::<ShareTarget>().unwrap(), ShareTarget::Twitter);
        assert_eq!("clipboard".parse::<ShareTarget>().unwrap(), ShareTarget::Copy);
        assert!("fax".parse::<ShareTarget>().is_err());
        for target in ShareTarget::ALL {
            assert_eq!(target.to_string().parse::<ShareTarget>().unwrap(), target);
        }
    }
}
