//! Carry out a share: open a link or copy text to the terminal clipboard

use std::io::{self, Write};

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use wrapped_core::ShareAction;

/// OSC 52 clipboard write understood by most modern terminals
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Write `text` to the terminal clipboard through `out`
pub fn copy_to_clipboard<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}

/// Perform `action` and return the message to show the user
pub fn dispatch(action: &ShareAction) -> Result<String> {
    match action {
        ShareAction::OpenUrl(url) => {
            open::that(url).context("Failed to open share link")?;
            Ok("Opening share link...".to_string())
        }
        ShareAction::CopyText(text) => {
            copy_to_clipboard(&mut io::stdout(), text).context("Failed to copy")?;
            Ok("Link copied!".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_copy_writes_sequence() {
        let mut out = Vec::new();
        copy_to_clipboard(&mut out, "₦2,450,000").unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.starts_with("\x1b]52;c;"));
        assert!(written.ends_with('\x07'));
        let payload = &written["\x1b]52;c;".len()..written.len() - 1];
        assert_eq!(STANDARD.decode(payload).unwrap(), "₦2,450,000".as_bytes());
    }
}
